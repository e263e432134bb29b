//! Advisory calculator for the "months of credit history" field.
//!
//! The result is only shown to the user; it is never copied into an applicant profile.

const FORMAT_MESSAGE: &str =
    "Data inserida de forma errada. Use o formato **aaaa/mm/dd** (ex.: 2018/06/15).";
const RANGE_MESSAGE: &str = "Data inserida de forma errada. Use o formato **aaaa/mm/dd** e verifique se a data final é posterior à inicial.";

/// Year, month, and day exactly as typed; no calendar validation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i64,
    pub month: i64,
    pub day: i64,
}

impl DateParts {
    pub fn parse(raw: &str) -> Result<Self, HistoryError> {
        let format_error = || HistoryError::Format {
            value: raw.to_string(),
        };

        let components: Vec<&str> = raw.split('/').collect();
        let &[year, month, day] = components.as_slice() else {
            return Err(format_error());
        };

        let parse = |component: &str| component.trim().parse::<i64>().map_err(|_| format_error());

        Ok(Self {
            year: parse(year)?,
            month: parse(month)?,
            day: parse(day)?,
        })
    }

    fn total_months(self) -> Option<i64> {
        self.year.checked_mul(12)?.checked_add(self.month)
    }
}

/// Whole months elapsed between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLength {
    pub months: u64,
}

impl HistoryLength {
    pub fn advisory(&self) -> String {
        format!(
            "Resultado da calculadora: **{} meses**. Copie este valor para o campo de histórico de crédito.",
            self.months
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("'{value}' is not a YYYY/MM/DD date")]
    Format { value: String },
    #[error("end date precedes start date ({months} months)")]
    Range { months: i64 },
}

impl HistoryError {
    pub fn user_message(&self) -> &'static str {
        match self {
            HistoryError::Format { .. } => FORMAT_MESSAGE,
            HistoryError::Range { .. } => RANGE_MESSAGE,
        }
    }
}

/// Count the whole months from `start` to `end`, both in `YYYY/MM/DD` form.
///
/// A final month counts only when the end day has reached the start day.
pub fn months_between(start: &str, end: &str) -> Result<HistoryLength, HistoryError> {
    let from = DateParts::parse(start)?;
    let to = DateParts::parse(end)?;

    let overflow = || HistoryError::Format {
        value: format!("{start} .. {end}"),
    };
    let from_total = from.total_months().ok_or_else(overflow)?;
    let to_total = to.total_months().ok_or_else(overflow)?;

    let mut months = to_total.checked_sub(from_total).ok_or_else(overflow)?;
    if to.day < from.day {
        months = months.checked_sub(1).ok_or_else(overflow)?;
    }

    u64::try_from(months)
        .map(|months| HistoryLength { months })
        .map_err(|_| HistoryError::Range { months })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_full_months_across_years() {
        let length = months_between("2019/01/01", "2025/08/20").expect("valid range");
        assert_eq!(length.months, 79);
    }

    #[test]
    fn incomplete_final_month_is_not_counted() {
        let length = months_between("2020/03/15", "2020/05/10").expect("valid range");
        assert_eq!(length.months, 1);
    }

    #[test]
    fn same_day_is_zero_months() {
        let length = months_between("2024/02/29", "2024/02/29").expect("valid range");
        assert_eq!(length.months, 0);
    }

    #[test]
    fn end_before_start_is_a_range_error() {
        let error = months_between("2025/01/01", "2020/01/01").expect_err("negative range");
        assert_eq!(error, HistoryError::Range { months: -60 });
        assert!(error.user_message().contains("posterior"));
    }

    #[test]
    fn range_check_runs_after_day_adjustment() {
        // Raw difference is zero; the day adjustment pushes it to -1.
        let error = months_between("2024/05/20", "2024/05/10").expect_err("negative range");
        assert_eq!(error, HistoryError::Range { months: -1 });
    }

    #[test]
    fn day_adjustment_at_the_lower_bound_is_rejected() {
        // The month difference is exactly i64::MIN before the day adjustment.
        let error = months_between("0/0/2", "-768614336404564650/-8/1")
            .expect_err("no representable month count");
        assert!(matches!(error, HistoryError::Format { .. }));
    }

    #[test]
    fn wrong_separator_is_a_format_error() {
        let error = months_between("2020-01-01", "2025/08/20").expect_err("bad format");
        assert!(matches!(error, HistoryError::Format { ref value } if value == "2020-01-01"));
        assert!(error.user_message().contains("2018/06/15"));
    }

    #[test]
    fn rejects_missing_and_extra_components() {
        assert!(matches!(
            months_between("2020/01", "2025/08/20"),
            Err(HistoryError::Format { .. })
        ));
        assert!(matches!(
            months_between("2020/01/01", "2025/08/20/01"),
            Err(HistoryError::Format { .. })
        ));
        assert!(matches!(
            months_between("2020/jan/01", "2025/08/20"),
            Err(HistoryError::Format { .. })
        ));
    }

    #[test]
    fn components_are_plain_integers() {
        // Whitespace is tolerated and no calendar validation happens.
        let length = months_between(" 2020 / 1 / 31 ", "2020/02/31").expect("lenient parse");
        assert_eq!(length.months, 1);
    }

    #[test]
    fn advisory_mentions_month_count() {
        let length = HistoryLength { months: 72 };
        assert!(length.advisory().contains("72 meses"));
    }
}

use serde::{Deserialize, Serialize};

use super::categories::{
    CategoryField, LoanType, MinimumPayment, Occupation, PaymentBehaviour,
};
use super::ScoringError;

/// Numeric answers of the applicant form.
///
/// Counts are unsigned so the "no negative values" bound holds by construction. Missing fields
/// take the same defaults the entry widgets start with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumericAttributes {
    pub age: u32,
    pub annual_income: f64,
    pub monthly_net_salary: f64,
    pub bank_accounts: u32,
    pub credit_cards: u32,
    pub interest_rate: f64,
    pub active_loans: u32,
    pub payment_delay_days: u32,
    pub late_payments: u32,
    pub credit_limit_variation: f64,
    pub credit_inquiries: u32,
    pub outstanding_debt: f64,
    pub credit_utilization: f64,
    pub monthly_loan_payments: f64,
    pub monthly_invested: f64,
    pub monthly_balance: f64,
    pub credit_history_months: u32,
}

impl Default for NumericAttributes {
    fn default() -> Self {
        Self {
            age: 35,
            annual_income: 85_000.0,
            monthly_net_salary: 5_500.0,
            bank_accounts: 3,
            credit_cards: 2,
            interest_rate: 2.5,
            active_loans: 1,
            payment_delay_days: 0,
            late_payments: 0,
            credit_limit_variation: 500.0,
            credit_inquiries: 2,
            outstanding_debt: 1_500.0,
            credit_utilization: 35.5,
            monthly_loan_payments: 800.0,
            monthly_invested: 1_200.0,
            monthly_balance: 3_000.0,
            credit_history_months: 72,
        }
    }
}

pub const MINIMUM_AGE: u32 = 18;

impl NumericAttributes {
    /// Enforce the bounds the entry widgets would have enforced.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.age < MINIMUM_AGE {
            return Err(ProfileError::BelowMinimum {
                field: "Idade (anos)",
                minimum: f64::from(MINIMUM_AGE),
                found: f64::from(self.age),
            });
        }

        let non_negative = [
            ("Renda anual ($)", self.annual_income),
            ("Salário líquido mensal ($)", self.monthly_net_salary),
            ("Dívida pendente ($)", self.outstanding_debt),
            ("Total de empréstimos ($/mês)", self.monthly_loan_payments),
            ("Valor investido mensal ($)", self.monthly_invested),
        ];
        for (field, value) in non_negative {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(ProfileError::BelowMinimum {
                    field,
                    minimum: 0.0,
                    found: value,
                });
            }
        }

        let percentages = [
            ("Taxa de juros (%)", self.interest_rate),
            (
                "Percentual de utilização do crédito (%)",
                self.credit_utilization,
            ),
        ];
        for (field, value) in percentages {
            check_finite(field, value)?;
            if !(0.0..=100.0).contains(&value) {
                return Err(ProfileError::OutsidePercentRange {
                    field,
                    found: value,
                });
            }
        }

        check_finite(
            "Variação do limite de crédito ($)",
            self.credit_limit_variation,
        )?;
        check_finite("Saldo mensal (R$)", self.monthly_balance)?;

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProfileError::NotFinite { field })
    }
}

/// Widget bound violations. These are shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("{field} must be at least {minimum}, found {found}")]
    BelowMinimum {
        field: &'static str,
        minimum: f64,
        found: f64,
    },
    #[error("{field} must be between 0 and 100, found {found}")]
    OutsidePercentRange { field: &'static str, found: f64 },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

impl ProfileError {
    pub fn user_message(&self) -> String {
        match self {
            ProfileError::BelowMinimum { field, minimum, .. } => {
                format!("O campo \"{field}\" deve ser maior ou igual a {minimum}.")
            }
            ProfileError::OutsidePercentRange { field, .. } => {
                format!("O campo \"{field}\" deve estar entre 0 e 100.")
            }
            ProfileError::NotFinite { field } => {
                format!("O campo \"{field}\" deve conter um número válido.")
            }
        }
    }
}

/// Raw form submission: numeric answers plus the display labels picked in each selection control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplicantForm {
    pub attributes: NumericAttributes,
    pub occupation: String,
    pub minimum_payment: String,
    pub payment_behaviour: String,
    pub loan_type: String,
}

impl Default for ApplicantForm {
    fn default() -> Self {
        Self {
            attributes: NumericAttributes::default(),
            occupation: Occupation::default_option().label().to_string(),
            minimum_payment: MinimumPayment::default_option().label().to_string(),
            payment_behaviour: PaymentBehaviour::default_option().label().to_string(),
            loan_type: LoanType::default_option().label().to_string(),
        }
    }
}

impl ApplicantForm {
    /// Validate the numeric answers and resolve every label to its canonical option.
    pub fn into_profile(self) -> Result<ApplicantProfile, ScoringError> {
        self.attributes.validate()?;

        Ok(ApplicantProfile {
            occupation: Occupation::from_label(&self.occupation)?,
            minimum_payment: MinimumPayment::from_label(&self.minimum_payment)?,
            payment_behaviour: PaymentBehaviour::from_label(&self.payment_behaviour)?,
            loan_type: LoanType::from_label(&self.loan_type)?,
            attributes: self.attributes,
        })
    }
}

/// Normalized applicant data for a single submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantProfile {
    pub attributes: NumericAttributes,
    pub occupation: Occupation,
    pub minimum_payment: MinimumPayment,
    pub payment_behaviour: PaymentBehaviour,
    pub loan_type: LoanType,
}

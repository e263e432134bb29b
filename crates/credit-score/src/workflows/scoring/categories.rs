//! Closed option sets for the four categorical applicant fields.
//!
//! Each option carries the bilingual label shown by the selection control and the canonical
//! token the scoring service was trained on. Label lookup is exact: anything outside the option
//! set is a [`LookupFailure`], never a pass-through.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::OnceLock;

/// A label that does not belong to the option set of `field`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no canonical {field} token for label '{label}'")]
pub struct LookupFailure {
    pub field: &'static str,
    pub label: String,
}

/// Shared behavior of the categorical option sets.
pub trait CategoryField: Copy + Eq + Hash + Send + Sync + 'static {
    /// Payload key the token is sent under.
    const FIELD: &'static str;
    /// Question displayed above the selection control.
    const PROMPT: &'static str;

    /// Options in display order; the first one is the control's default.
    fn ordered() -> &'static [Self];
    fn label(self) -> &'static str;
    fn token(self) -> &'static str;
    fn label_index() -> &'static HashMap<&'static str, Self>;

    fn from_label(label: &str) -> Result<Self, LookupFailure> {
        Self::label_index()
            .get(label)
            .copied()
            .ok_or_else(|| LookupFailure {
                field: Self::FIELD,
                label: label.to_string(),
            })
    }

    fn default_option() -> Self {
        Self::ordered()[0]
    }

    fn option_set() -> OptionSet {
        OptionSet {
            field: Self::FIELD,
            prompt: Self::PROMPT,
            labels: Self::ordered().iter().map(|option| option.label()).collect(),
        }
    }
}

fn build_label_index<T: CategoryField>() -> HashMap<&'static str, T> {
    let options = T::ordered();
    let mut index = HashMap::with_capacity(options.len());
    for option in options {
        index.insert(option.label(), *option);
    }
    index
}

/// Serializable description of one selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    pub field: &'static str,
    pub prompt: &'static str,
    pub labels: Vec<&'static str>,
}

/// The four selection controls in form order.
pub fn option_sets() -> [OptionSet; 4] {
    [
        Occupation::option_set(),
        MinimumPayment::option_set(),
        PaymentBehaviour::option_set(),
        LoanType::option_set(),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupation {
    Accountant,
    Architect,
    Developer,
    Doctor,
    Engineer,
    Entrepreneur,
    Journalist,
    Lawyer,
    Manager,
    Mechanic,
    MediaManager,
    Musician,
    NotInformed,
    Scientist,
    Teacher,
    Writer,
}

impl CategoryField for Occupation {
    const FIELD: &'static str = "ocupacao";
    const PROMPT: &'static str = "Qual é a ocupação?";

    fn ordered() -> &'static [Self] {
        &[
            Self::Accountant,
            Self::Architect,
            Self::Developer,
            Self::Doctor,
            Self::Engineer,
            Self::Entrepreneur,
            Self::Journalist,
            Self::Lawyer,
            Self::Manager,
            Self::Mechanic,
            Self::MediaManager,
            Self::Musician,
            Self::NotInformed,
            Self::Scientist,
            Self::Teacher,
            Self::Writer,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Self::Accountant => "Accountant (Contador[a])",
            Self::Architect => "Architect (Arquiteto[a])",
            Self::Developer => "Developer (Desenvolvedor[a])",
            Self::Doctor => "Doctor (Médico[a])",
            Self::Engineer => "Engineer (Engenheiro[a])",
            Self::Entrepreneur => "Entrepreneur (Empreendedor[a])",
            Self::Journalist => "Journalist (Jornalista)",
            Self::Lawyer => "Lawyer (Advogado[a])",
            Self::Manager => "Manager (Gestor[a])",
            Self::Mechanic => "Mechanic (Mecânico[a])",
            Self::MediaManager => "Media Manager (Gestor[a] de Mídia)",
            Self::Musician => "Musician (Músico[a])",
            Self::NotInformed => "Not Informed (Não informado)",
            Self::Scientist => "Scientist (Cientista)",
            Self::Teacher => "Teacher (Professor[a])",
            Self::Writer => "Writer (Escritor[a])",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::Accountant => "Accountant",
            Self::Architect => "Architect",
            Self::Developer => "Developer",
            Self::Doctor => "Doctor",
            Self::Engineer => "Engineer",
            Self::Entrepreneur => "Entrepreneur",
            Self::Journalist => "Journalist",
            Self::Lawyer => "Lawyer",
            Self::Manager => "Manager",
            Self::Mechanic => "Mechanic",
            Self::MediaManager => "Media_Manager",
            Self::Musician => "Musician",
            Self::NotInformed => "Not Informed",
            Self::Scientist => "Scientist",
            Self::Teacher => "Teacher",
            Self::Writer => "Writer",
        }
    }

    fn label_index() -> &'static HashMap<&'static str, Self> {
        static INDEX: OnceLock<HashMap<&'static str, Occupation>> = OnceLock::new();
        INDEX.get_or_init(build_label_index::<Self>)
    }
}

/// Whether the applicant usually pays only the minimum amount due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinimumPayment {
    No,
    Yes,
    NotInformed,
}

impl CategoryField for MinimumPayment {
    const FIELD: &'static str = "pagamento_valor_minimo";
    const PROMPT: &'static str = "O cliente costuma pagar apenas o valor mínimo da fatura?";

    fn ordered() -> &'static [Self] {
        &[Self::No, Self::Yes, Self::NotInformed]
    }

    fn label(self) -> &'static str {
        match self {
            Self::No => "No (Não)",
            Self::Yes => "Yes (Sim)",
            Self::NotInformed => "Not Informed (Não informado)",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
            Self::NotInformed => "Not Informed",
        }
    }

    fn label_index() -> &'static HashMap<&'static str, Self> {
        static INDEX: OnceLock<HashMap<&'static str, MinimumPayment>> = OnceLock::new();
        INDEX.get_or_init(build_label_index::<Self>)
    }
}

/// Spend level crossed with the typical payment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentBehaviour {
    HighSpentLargeValue,
    HighSpentMediumValue,
    HighSpentSmallValue,
    LowSpentLargeValue,
    LowSpentMediumValue,
    LowSpentSmallValue,
}

impl CategoryField for PaymentBehaviour {
    const FIELD: &'static str = "comportamento_pagamento";
    const PROMPT: &'static str = "Qual é o comportamento de pagamento?";

    fn ordered() -> &'static [Self] {
        &[
            Self::HighSpentLargeValue,
            Self::HighSpentMediumValue,
            Self::HighSpentSmallValue,
            Self::LowSpentLargeValue,
            Self::LowSpentMediumValue,
            Self::LowSpentSmallValue,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Self::HighSpentLargeValue => {
                "High spent Large value payments (Gastos altos, pagamentos de grande valor)"
            }
            Self::HighSpentMediumValue => {
                "High spent Medium value payments (Gastos altos, pagamentos de valor médio)"
            }
            Self::HighSpentSmallValue => {
                "High spent Small value payments (Gastos altos, pagamentos de pequeno valor)"
            }
            Self::LowSpentLargeValue => {
                "Low spent Large value payments (Gastos baixos, pagamentos de grande valor)"
            }
            Self::LowSpentMediumValue => {
                "Low spent Medium value payments (Gastos baixos, pagamentos de valor médio)"
            }
            Self::LowSpentSmallValue => {
                "Low spent Small value payments (Gastos baixos, pagamentos de pequeno valor)"
            }
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::HighSpentLargeValue => "High_spent_Large_value_payments",
            Self::HighSpentMediumValue => "High_spent_Medium_value_payments",
            Self::HighSpentSmallValue => "High_spent_Small_value_payments",
            Self::LowSpentLargeValue => "Low_spent_Large_value_payments",
            Self::LowSpentMediumValue => "Low_spent_Medium_value_payments",
            Self::LowSpentSmallValue => "Low_spent_Small_value_payments",
        }
    }

    fn label_index() -> &'static HashMap<&'static str, Self> {
        static INDEX: OnceLock<HashMap<&'static str, PaymentBehaviour>> = OnceLock::new();
        INDEX.get_or_init(build_label_index::<Self>)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanType {
    AutoLoan,
    CreditBuilderLoan,
    DebtConsolidationLoan,
    HomeEquityLoan,
    MortgageLoan,
    NotSpecified,
    PaydayLoan,
    PersonalLoan,
    StudentLoan,
    TwoOrMoreTypes,
}

impl CategoryField for LoanType {
    const FIELD: &'static str = "tipos_emprestimos";
    const PROMPT: &'static str = "Qual é o tipo de empréstimo?";

    fn ordered() -> &'static [Self] {
        &[
            Self::AutoLoan,
            Self::CreditBuilderLoan,
            Self::DebtConsolidationLoan,
            Self::HomeEquityLoan,
            Self::MortgageLoan,
            Self::NotSpecified,
            Self::PaydayLoan,
            Self::PersonalLoan,
            Self::StudentLoan,
            Self::TwoOrMoreTypes,
        ]
    }

    fn label(self) -> &'static str {
        match self {
            Self::AutoLoan => "Auto Loan (Empréstimo para Automóvel)",
            Self::CreditBuilderLoan => "Credit-Builder Loan (Empréstimo para Construção de Crédito)",
            Self::DebtConsolidationLoan => {
                "Debt Consolidation Loan (Empréstimo para Consolidação de Dívidas)"
            }
            Self::HomeEquityLoan => "Home Equity Loan (Empréstimo com Garantia de Imóvel)",
            Self::MortgageLoan => "Mortgage Loan (Hipoteca)",
            Self::NotSpecified => "Not Specified (Não especificado)",
            Self::PaydayLoan => "Payday Loan (Empréstimo Consignado/Salário)",
            Self::PersonalLoan => "Personal Loan (Empréstimo Pessoal)",
            Self::StudentLoan => "Student Loan (Empréstimo Estudantil)",
            Self::TwoOrMoreTypes => "Two or More Types of Loan (Dois ou mais tipos de empréstimo)",
        }
    }

    fn token(self) -> &'static str {
        match self {
            Self::AutoLoan => "Auto Loan",
            Self::CreditBuilderLoan => "Credit-Builder Loan",
            Self::DebtConsolidationLoan => "Debt Consolidation Loan",
            Self::HomeEquityLoan => "Home Equity Loan",
            Self::MortgageLoan => "Mortgage Loan",
            Self::NotSpecified => "Not Specified",
            Self::PaydayLoan => "Payday Loan",
            Self::PersonalLoan => "Personal Loan",
            Self::StudentLoan => "Student Loan",
            Self::TwoOrMoreTypes => "Two or More Types of Loan",
        }
    }

    fn label_index() -> &'static HashMap<&'static str, Self> {
        static INDEX: OnceLock<HashMap<&'static str, LoanType>> = OnceLock::new();
        INDEX.get_or_init(build_label_index::<Self>)
    }
}

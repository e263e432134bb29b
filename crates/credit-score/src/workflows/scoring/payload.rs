use serde::Serialize;

use super::categories::CategoryField;
use super::profile::ApplicantProfile;

/// Request body expected by the scoring service: every attribute nested under `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionPayload {
    pub data: PayloadData,
}

/// Field order here is the serialization order on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadData {
    #[serde(rename = "idade")]
    pub age: u32,
    #[serde(rename = "renda_anual")]
    pub annual_income: f64,
    #[serde(rename = "salario_liquido_mensal")]
    pub monthly_net_salary: f64,
    #[serde(rename = "qtd_contas_bancarias")]
    pub bank_accounts: u32,
    #[serde(rename = "qtd_cartoes_credito")]
    pub credit_cards: u32,
    #[serde(rename = "taxa_juros")]
    pub interest_rate: f64,
    #[serde(rename = "qtd_emprestimos")]
    pub active_loans: u32,
    #[serde(rename = "dias_atraso_pagamento")]
    pub payment_delay_days: u32,
    #[serde(rename = "qtd_pagamentos_atrasados")]
    pub late_payments: u32,
    #[serde(rename = "variacao_limite_credito")]
    pub credit_limit_variation: f64,
    #[serde(rename = "qtd_consultas_credito")]
    pub credit_inquiries: u32,
    #[serde(rename = "divida_pendente")]
    pub outstanding_debt: f64,
    #[serde(rename = "percentual_utilizacao_credito")]
    pub credit_utilization: f64,
    #[serde(rename = "total_emprestimos_mensal")]
    pub monthly_loan_payments: f64,
    #[serde(rename = "valor_investido_mensal")]
    pub monthly_invested: f64,
    #[serde(rename = "saldo_mensal")]
    pub monthly_balance: f64,
    #[serde(rename = "tempo_historico_credito_meses")]
    pub credit_history_months: u32,
    #[serde(rename = "ocupacao")]
    pub occupation: &'static str,
    #[serde(rename = "pagamento_valor_minimo")]
    pub minimum_payment: &'static str,
    #[serde(rename = "comportamento_pagamento")]
    pub payment_behaviour: &'static str,
    #[serde(rename = "tipos_emprestimos")]
    pub loan_type: &'static str,
}

impl PredictionPayload {
    pub fn assemble(profile: &ApplicantProfile) -> Self {
        let attributes = &profile.attributes;
        Self {
            data: PayloadData {
                age: attributes.age,
                annual_income: attributes.annual_income,
                monthly_net_salary: attributes.monthly_net_salary,
                bank_accounts: attributes.bank_accounts,
                credit_cards: attributes.credit_cards,
                interest_rate: attributes.interest_rate,
                active_loans: attributes.active_loans,
                payment_delay_days: attributes.payment_delay_days,
                late_payments: attributes.late_payments,
                credit_limit_variation: attributes.credit_limit_variation,
                credit_inquiries: attributes.credit_inquiries,
                outstanding_debt: attributes.outstanding_debt,
                credit_utilization: attributes.credit_utilization,
                monthly_loan_payments: attributes.monthly_loan_payments,
                monthly_invested: attributes.monthly_invested,
                monthly_balance: attributes.monthly_balance,
                credit_history_months: attributes.credit_history_months,
                occupation: profile.occupation.token(),
                minimum_payment: profile.minimum_payment.token(),
                payment_behaviour: profile.payment_behaviour.token(),
                loan_type: profile.loan_type.token(),
            },
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

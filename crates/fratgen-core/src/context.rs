//! Template context assembly.
//!
//! The renderer downstream is a black box taking a flat key→value
//! mapping; this module merges extractor output with user-edited form
//! values into that mapping. Precedence is extracted value over
//! user-supplied default, except for keys the caller explicitly forces
//! to the form value. The payslip shadows the contract for salary,
//! period and bonus fields; the contract leads everywhere else.

use std::collections::{BTreeMap, BTreeSet};

use crate::extract::rules::{format_date_long, CurrencyFormat, DANISH};
use crate::models::{ExtractedFields, FieldKey};

/// User-edited form values, keyed by template placeholder name.
pub type FormValues = BTreeMap<String, String>;

/// A flat key→value mapping ready for the document renderer.
pub type TemplateContext = BTreeMap<String, String>;

/// Builds template contexts from extraction results and form values.
pub struct ContextBuilder<'a> {
    contract: &'a ExtractedFields,
    payslip: &'a ExtractedFields,
    form: &'a FormValues,
    force_form: BTreeSet<String>,
    currency: CurrencyFormat,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(
        contract: &'a ExtractedFields,
        payslip: &'a ExtractedFields,
        form: &'a FormValues,
    ) -> Self {
        Self {
            contract,
            payslip,
            form,
            force_form: BTreeSet::new(),
            currency: DANISH,
        }
    }

    /// Force the form value for `key`, even when an extractor found one.
    pub fn force_form_value(mut self, key: impl Into<String>) -> Self {
        self.force_form.insert(key.into());
        self
    }

    /// Use a different display convention for currency values.
    pub fn with_currency_format(mut self, format: CurrencyFormat) -> Self {
        self.currency = format;
        self
    }

    fn form_value(&self, key: &str) -> Option<&str> {
        self.form
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Resolve one field with the precedence policy.
    fn resolve(&self, key: FieldKey) -> Option<String> {
        if self.force_form.contains(key.as_str()) {
            return self.form_value(key.as_str()).map(str::to_string);
        }

        let payslip_leads = matches!(
            key,
            FieldKey::MonthlySalary
                | FieldKey::PeriodFrom
                | FieldKey::PeriodTo
                | FieldKey::BonusYear
                | FieldKey::BonusAmount
        );

        let (first, second) = if payslip_leads {
            (self.payslip, self.contract)
        } else {
            (self.contract, self.payslip)
        };

        first
            .get(key)
            .or_else(|| second.get(key))
            .or_else(|| self.form_value(key.as_str()))
            .map(str::to_string)
    }

    /// Context for the severance agreement template.
    ///
    /// All resolved fields plus derived display values; form keys
    /// outside the extraction vocabulary pass through untouched.
    pub fn build_severance_context(&self) -> TemplateContext {
        let mut ctx: TemplateContext = self.form.clone();

        for key in FieldKey::ALL {
            let value = self.resolve(key).unwrap_or_default();
            ctx.insert(key.as_str().to_string(), value);
        }

        // Display derivatives: templates print the salary in Danish
        // convention, and the bonus both raw and formatted
        if let Some(salary) = self.resolve(FieldKey::MonthlySalary) {
            ctx.insert(
                FieldKey::MonthlySalary.as_str().to_string(),
                self.currency.format_raw(&salary),
            );
        }
        let bonus_fmt = self
            .resolve(FieldKey::BonusAmount)
            .map(|raw| self.currency.format_raw(&raw))
            .unwrap_or_default();
        ctx.insert("BonusAmountFmt".to_string(), bonus_fmt);

        ctx
    }

    /// Context for the termination memo template.
    ///
    /// The memo uses a smaller key set and prints the employment start
    /// in Danish long form.
    pub fn build_memo_context(&self) -> TemplateContext {
        let mut ctx: TemplateContext = self.form.clone();

        for key in [FieldKey::EmployeeName, FieldKey::CompanyName] {
            let value = self.resolve(key).unwrap_or_default();
            ctx.insert(key.as_str().to_string(), value);
        }

        let start = self.resolve(FieldKey::EmploymentStart).unwrap_or_default();
        let start_long = if start.is_empty() {
            String::new()
        } else {
            format_date_long(&start)
        };
        ctx.insert("Start_Date".to_string(), start_long);

        ctx
    }
}

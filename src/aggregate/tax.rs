use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::config::TaxSettings;

/// How income tax is estimated from pre-tax profit.
pub trait TaxPolicy {
    fn name(&self) -> String;

    fn rate(&self) -> Decimal;

    fn cess_rate(&self) -> Decimal;

    /// Tax charged to the P&L. Loss years pay nothing.
    fn tax_expense(&self, profit_before_tax: Decimal) -> Decimal {
        if profit_before_tax > Decimal::ZERO {
            (profit_before_tax * self.rate()).round_dp(2)
        } else {
            Decimal::ZERO
        }
    }

    fn cess(&self, tax: Decimal) -> Decimal {
        (tax * self.cess_rate()).round_dp(2)
    }
}

/// Single flat rate on positive profit plus a cess on the tax.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRateTax {
    pub rate: Decimal,
    pub cess_rate: Decimal,
}

impl Default for FlatRateTax {
    fn default() -> Self {
        Self {
            rate: dec!(0.25),
            cess_rate: dec!(0.04),
        }
    }
}

impl From<&TaxSettings> for FlatRateTax {
    fn from(settings: &TaxSettings) -> Self {
        Self {
            rate: settings.rate,
            cess_rate: settings.cess_rate,
        }
    }
}

impl TaxPolicy for FlatRateTax {
    fn name(&self) -> String {
        format!("flat {}%", (self.rate * Decimal::ONE_HUNDRED).normalize())
    }

    fn rate(&self) -> Decimal {
        self.rate
    }

    fn cess_rate(&self) -> Decimal {
        self.cess_rate
    }
}

/// Return-style computation of taxable income and the resulting liability.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaxComputation {
    pub profit_before_tax: Decimal,
    pub add_book_depreciation: Decimal,
    /// Tax-law depreciation; the books carry no separate block, so it mirrors book depreciation.
    pub less_allowable_depreciation: Decimal,
    pub gross_total_income: Decimal,
    pub deductions: Decimal,
    /// Rounded to the nearest ten, never negative.
    pub taxable_income: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
    pub cess_rate: Decimal,
    pub cess: Decimal,
    pub total_liability: Decimal,
    pub tds_credit: Decimal,
    /// Positive when payable, negative when refundable.
    pub net_payable: Decimal,
}

impl TaxComputation {
    pub fn compute(
        policy: &dyn TaxPolicy,
        profit_before_tax: Decimal,
        depreciation: Decimal,
        tds_credit: Decimal,
    ) -> Self {
        let add_book_depreciation = depreciation;
        let less_allowable_depreciation = depreciation;
        let gross_total_income =
            profit_before_tax + add_book_depreciation - less_allowable_depreciation;
        let deductions = Decimal::ZERO;
        let taxable_income = round_to_ten((gross_total_income - deductions).max(Decimal::ZERO));
        let tax = policy.tax_expense(taxable_income);
        let cess = policy.cess(tax);
        let total_liability = tax + cess;

        Self {
            profit_before_tax,
            add_book_depreciation,
            less_allowable_depreciation,
            gross_total_income,
            deductions,
            taxable_income,
            rate: policy.rate(),
            tax,
            cess_rate: policy.cess_rate(),
            cess,
            total_liability,
            tds_credit,
            net_payable: total_liability - tds_credit,
        }
    }
}

fn round_to_ten(amount: Decimal) -> Decimal {
    let ten = Decimal::TEN;
    (amount / ten).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) * ten
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_rate_on_positive_profit_only() {
        let policy = FlatRateTax::default();
        assert_eq!(policy.tax_expense(dec!(350000)), dec!(87500));
        assert_eq!(policy.tax_expense(Decimal::ZERO), Decimal::ZERO);
        assert_eq!(policy.tax_expense(dec!(-1000)), Decimal::ZERO);
    }

    #[test]
    fn computation_adds_cess_and_credits_tds() {
        let policy = FlatRateTax::default();
        let comp = TaxComputation::compute(&policy, dec!(350004), dec!(5000), dec!(30000));
        assert_eq!(comp.taxable_income, dec!(350000));
        assert_eq!(comp.tax, dec!(87500));
        assert_eq!(comp.cess, dec!(3500));
        assert_eq!(comp.total_liability, dec!(91000));
        assert_eq!(comp.net_payable, dec!(61000));
    }

    #[test]
    fn loss_year_has_refund_of_tds() {
        let policy = FlatRateTax::default();
        let comp = TaxComputation::compute(&policy, dec!(-20000), Decimal::ZERO, dec!(1500));
        assert_eq!(comp.taxable_income, Decimal::ZERO);
        assert_eq!(comp.total_liability, Decimal::ZERO);
        assert_eq!(comp.net_payable, dec!(-1500));
    }

    #[test]
    fn custom_policy_plugs_in() {
        struct Exempt;
        impl TaxPolicy for Exempt {
            fn name(&self) -> String {
                "exempt".into()
            }
            fn rate(&self) -> Decimal {
                Decimal::ZERO
            }
            fn cess_rate(&self) -> Decimal {
                Decimal::ZERO
            }
        }
        assert_eq!(Exempt.tax_expense(dec!(1000000)), Decimal::ZERO);
    }
}

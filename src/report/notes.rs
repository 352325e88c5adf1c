/// Numbered notes to accounts.
///
/// The statements print `Note::number()` in their "Note No." column and the
/// notes section prints `Note::heading()`, so both always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Note {
    ShareCapital,
    ReservesAndSurplus,
    OtherCurrentLiabilities,
    CashAndBank,
    RevenueFromOperations,
    OtherIncome,
    OtherExpenses,
}

impl Note {
    pub const ALL: [Note; 7] = [
        Note::ShareCapital,
        Note::ReservesAndSurplus,
        Note::OtherCurrentLiabilities,
        Note::CashAndBank,
        Note::RevenueFromOperations,
        Note::OtherIncome,
        Note::OtherExpenses,
    ];

    pub fn number(self) -> usize {
        match self {
            Note::ShareCapital => 1,
            Note::ReservesAndSurplus => 2,
            Note::OtherCurrentLiabilities => 3,
            Note::CashAndBank => 4,
            Note::RevenueFromOperations => 5,
            Note::OtherIncome => 6,
            Note::OtherExpenses => 7,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Note::ShareCapital => "Share Capital",
            Note::ReservesAndSurplus => "Reserves and Surplus",
            Note::OtherCurrentLiabilities => "Other Current Liabilities",
            Note::CashAndBank => "Cash and Bank Balances",
            Note::RevenueFromOperations => "Revenue from Operations",
            Note::OtherIncome => "Other Income",
            Note::OtherExpenses => "Other Expenses",
        }
    }

    pub fn heading(self) -> String {
        format!("Note {}: {}", self.number(), self.title())
    }

    /// Value for a statement's "Note No." cell.
    pub fn cell(self) -> String {
        self.number().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_sequential_in_declaration_order() {
        for (i, note) in Note::ALL.iter().enumerate() {
            assert_eq!(note.number(), i + 1);
            assert!(note.heading().starts_with(&format!("Note {}:", i + 1)));
        }
    }
}

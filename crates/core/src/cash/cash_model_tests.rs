//! Tests for cash domain models.

#[cfg(test)]
mod tests {
    use crate::cash::{CashAccount, CashAdjustment, CashTransactionType, NewCashTransaction};
    use crate::errors::PositionError;
    use crate::Error;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn account(balance: rust_decimal::Decimal) -> CashAccount {
        CashAccount {
            id: "acct-1".to_string(),
            user_id: "user-1".to_string(),
            balance,
        }
    }

    #[test]
    fn test_deposit_adds_to_balance() {
        let mut acct = account(dec!(100));
        acct.apply_deposit(dec!(50.25));
        assert_eq!(acct.balance, dec!(150.25));
    }

    #[test]
    fn test_withdrawal_subtracts_from_balance() {
        let mut acct = account(dec!(100));
        acct.apply_withdrawal(dec!(40)).unwrap();
        assert_eq!(acct.balance, dec!(60));
    }

    #[test]
    fn test_withdrawal_of_full_balance_leaves_zero() {
        let mut acct = account(dec!(75.50));
        acct.apply_withdrawal(dec!(75.50)).unwrap();
        assert_eq!(acct.balance, dec!(0));
    }

    #[test]
    fn test_withdrawal_exceeding_balance_is_rejected() {
        let mut acct = account(dec!(30));
        let err = acct.apply_withdrawal(dec!(30.01)).unwrap_err();
        match err {
            Error::Position(PositionError::InsufficientFunds {
                attempted,
                available,
            }) => {
                assert_eq!(attempted, dec!(30.01));
                assert_eq!(available, dec!(30));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Balance untouched after the rejection
        assert_eq!(acct.balance, dec!(30));
    }

    #[test]
    fn test_adjustment_requires_positive_amount() {
        let adjustment = CashAdjustment {
            user_id: "user-1".to_string(),
            amount: dec!(0),
            date: None,
        };
        assert!(adjustment.validate().is_err());

        let adjustment = CashAdjustment {
            user_id: "user-1".to_string(),
            amount: dec!(-5),
            date: None,
        };
        assert!(adjustment.validate().is_err());
    }

    #[test]
    fn test_adjustment_effective_date_defaults_to_today() {
        let explicit = CashAdjustment {
            user_id: "user-1".to_string(),
            amount: dec!(10),
            date: NaiveDate::from_ymd_opt(2024, 3, 15),
        };
        assert_eq!(
            explicit.effective_date(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );

        let defaulted = CashAdjustment {
            user_id: "user-1".to_string(),
            amount: dec!(10),
            date: None,
        };
        assert_eq!(defaulted.effective_date(), chrono::Utc::now().date_naive());
    }

    #[test]
    fn test_new_transaction_validation() {
        let valid = NewCashTransaction {
            user_id: "user-1".to_string(),
            transaction_type: CashTransactionType::Expense,
            amount: dec!(12.50),
            category: "Groceries".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        };
        assert!(valid.validate().is_ok());

        let mut missing_category = valid.clone();
        missing_category.category = "  ".to_string();
        assert!(missing_category.validate().is_err());

        let mut zero_amount = valid.clone();
        zero_amount.amount = dec!(0);
        assert!(zero_amount.validate().is_err());

        let mut missing_user = valid;
        missing_user.user_id = String::new();
        assert!(missing_user.validate().is_err());
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!(
            "income".parse::<CashTransactionType>().unwrap(),
            CashTransactionType::Income
        );
        assert_eq!(
            "expense".parse::<CashTransactionType>().unwrap(),
            CashTransactionType::Expense
        );
        assert!("transfer".parse::<CashTransactionType>().is_err());
    }
}

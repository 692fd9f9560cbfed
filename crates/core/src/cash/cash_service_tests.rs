#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::cash::{
        CashAccount, CashAdjustment, CashRepositoryTrait, CashService, CashServiceTrait,
        CashTransaction, NewCashTransaction,
    };
    use crate::errors::{Error, PositionError, Result, ValidationError};

    /// Records which repository calls went through, so tests can assert that
    /// validation failures never reach persistence.
    #[derive(Default)]
    struct RecordingRepository {
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingRepository {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn account(user_id: &str) -> CashAccount {
            CashAccount {
                id: "acct-1".to_string(),
                user_id: user_id.to_string(),
                balance: dec!(100),
            }
        }
    }

    #[async_trait]
    impl CashRepositoryTrait for RecordingRepository {
        async fn get_or_create_account(&self, user_id: &str) -> Result<CashAccount> {
            self.calls.lock().unwrap().push("get_or_create_account");
            Ok(Self::account(user_id))
        }

        async fn execute_deposit(&self, adjustment: CashAdjustment) -> Result<CashAccount> {
            self.calls.lock().unwrap().push("execute_deposit");
            let mut account = Self::account(&adjustment.user_id);
            account.apply_deposit(adjustment.amount);
            Ok(account)
        }

        async fn execute_withdrawal(&self, adjustment: CashAdjustment) -> Result<CashAccount> {
            self.calls.lock().unwrap().push("execute_withdrawal");
            let mut account = Self::account(&adjustment.user_id);
            account.apply_withdrawal(adjustment.amount)?;
            Ok(account)
        }

        async fn add_transaction(
            &self,
            new_transaction: NewCashTransaction,
        ) -> Result<CashTransaction> {
            self.calls.lock().unwrap().push("add_transaction");
            Ok(CashTransaction {
                id: "txn-1".to_string(),
                user_id: new_transaction.user_id,
                transaction_type: new_transaction.transaction_type,
                amount: new_transaction.amount,
                category: new_transaction.category,
                description: new_transaction.description,
                date: new_transaction.date,
            })
        }

        fn list_transactions(&self, _user_id: &str) -> Result<Vec<CashTransaction>> {
            Ok(Vec::new())
        }
    }

    fn service() -> (CashService, Arc<RecordingRepository>) {
        let repository = Arc::new(RecordingRepository::default());
        (CashService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_deposit_delegates_after_validation() {
        let (service, repository) = service();
        let account = service.deposit("u1", dec!(50), None).await.unwrap();
        assert_eq!(account.balance, dec!(150));
        assert_eq!(repository.calls(), vec!["execute_deposit"]);
    }

    #[tokio::test]
    async fn test_non_positive_deposit_never_reaches_the_repository() {
        let (service, repository) = service();
        let err = service.deposit("u1", dec!(0), None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidInput(_))
        ));
        assert!(repository.calls().is_empty());
    }

    #[tokio::test]
    async fn test_withdrawal_propagates_insufficient_funds() {
        let (service, _) = service();
        let err = service.withdraw("u1", dec!(500), None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Position(PositionError::InsufficientFunds { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_user_id_is_a_missing_field() {
        let (service, repository) = service();
        let err = service.deposit("  ", dec!(10), None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(_))
        ));
        assert!(repository.calls().is_empty());
    }
}

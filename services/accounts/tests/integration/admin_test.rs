use atelier_accounts::domain::types::{AccountChanges, AccountSortBy};
use atelier_accounts::error::AccountsServiceError;
use atelier_accounts::usecase::admin::{
    DeleteAccountUseCase, ListAccountsUseCase, UpdateAccountUseCase,
};
use atelier_domain::pagination::{PageRequest, Sort};
use atelier_domain::role::AccountRole;

use crate::helpers::MockStore;

#[tokio::test]
async fn should_list_accounts_with_pagination() {
    let store = MockStore::new();
    for i in 0..3 {
        store.seed_account(&format!("user{i}@example.com"), "hash", true);
    }

    let usecase = ListAccountsUseCase {
        accounts: store.clone(),
    };
    let page = usecase
        .execute(
            AccountSortBy::default(),
            PageRequest {
                per_page: 2,
                page: 1,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn should_sort_listing_by_email() {
    let store = MockStore::new();
    store.seed_account("carol@example.com", "hash", true);
    store.seed_account("alice@example.com", "hash", true);
    store.seed_account("bob@example.com", "hash", true);

    let usecase = ListAccountsUseCase {
        accounts: store.clone(),
    };
    let listed = usecase
        .execute(AccountSortBy::Email(Sort::Asc), PageRequest::default())
        .await
        .unwrap();

    let emails: Vec<&str> = listed.iter().map(|a| a.email.as_str()).collect();
    assert_eq!(
        emails,
        vec!["alice@example.com", "bob@example.com", "carol@example.com"]
    );
}

#[tokio::test]
async fn should_update_role_and_active_flag() {
    let store = MockStore::new();
    let id = store.seed_account("ada@example.com", "hash", false);

    let usecase = UpdateAccountUseCase {
        accounts: store.clone(),
    };
    usecase
        .execute(
            id,
            AccountChanges {
                role: Some(AccountRole::Admin),
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let account = store.account(id).unwrap();
    assert_eq!(account.role, AccountRole::Admin);
    assert!(account.is_active);
}

#[tokio::test]
async fn should_reject_empty_update() {
    let store = MockStore::new();
    let id = store.seed_account("ada@example.com", "hash", true);

    let usecase = UpdateAccountUseCase {
        accounts: store.clone(),
    };
    let result = usecase.execute(id, AccountChanges::default()).await;

    assert!(matches!(result, Err(AccountsServiceError::MissingData)));
}

#[tokio::test]
async fn should_reject_update_with_malformed_email() {
    let store = MockStore::new();
    let id = store.seed_account("ada@example.com", "hash", true);

    let usecase = UpdateAccountUseCase {
        accounts: store.clone(),
    };
    let result = usecase
        .execute(
            id,
            AccountChanges {
                email: Some("broken".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AccountsServiceError::InvalidEmail)));
}

#[tokio::test]
async fn should_reject_update_of_unknown_account() {
    let store = MockStore::new();
    let usecase = UpdateAccountUseCase {
        accounts: store.clone(),
    };

    let result = usecase
        .execute(
            999,
            AccountChanges {
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AccountsServiceError::AccountNotFound)));
}

#[tokio::test]
async fn should_delete_account() {
    let store = MockStore::new();
    let id = store.seed_account("ada@example.com", "hash", true);

    let usecase = DeleteAccountUseCase {
        accounts: store.clone(),
    };
    usecase.execute(id).await.unwrap();

    assert_eq!(store.account_count(), 0);
    assert!(matches!(
        usecase.execute(id).await,
        Err(AccountsServiceError::AccountNotFound)
    ));
}

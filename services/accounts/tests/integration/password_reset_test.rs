use chrono::{Duration, Utc};

use atelier_accounts::domain::types::{TOKEN_LEN, TokenPurpose};
use atelier_accounts::error::AccountsServiceError;
use atelier_accounts::password::{hash_password, verify_password};
use atelier_accounts::usecase::password_reset::{
    RequestPasswordResetUseCase, ResetPasswordInput, ResetPasswordUseCase,
};

use crate::helpers::{MockStore, expired};

#[tokio::test]
async fn should_create_reset_token_for_known_email() {
    let store = MockStore::new();
    let account_id = store.seed_account("ada@example.com", "hash", true);

    let usecase = RequestPasswordResetUseCase {
        accounts: store.clone(),
        tokens: store.clone(),
    };
    let token = usecase.execute("ada@example.com").await.unwrap().unwrap();

    assert_eq!(token.len(), TOKEN_LEN);
    let tokens = store.tokens_for(account_id, TokenPurpose::Reset);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value, token);
    assert!(tokens[0].expires_at > Utc::now() + Duration::minutes(55));
    assert!(tokens[0].expires_at <= Utc::now() + Duration::minutes(65));
}

#[tokio::test]
async fn should_return_none_for_unknown_email_without_creating_tokens() {
    let store = MockStore::new();
    let usecase = RequestPasswordResetUseCase {
        accounts: store.clone(),
        tokens: store.clone(),
    };

    assert!(usecase.execute("nobody@example.com").await.unwrap().is_none());
    assert!(usecase.execute("nobody@example.com").await.unwrap().is_none());
    assert_eq!(store.token_count(), 0, "no token rows may be created");
}

#[tokio::test]
async fn should_supersede_previous_reset_token() {
    let store = MockStore::new();
    let account_id = store.seed_account("ada@example.com", "hash", true);

    let request = RequestPasswordResetUseCase {
        accounts: store.clone(),
        tokens: store.clone(),
    };
    let first = request.execute("ada@example.com").await.unwrap().unwrap();
    let second = request.execute("ada@example.com").await.unwrap().unwrap();

    assert_ne!(first, second, "each request yields a fresh value");
    assert_eq!(
        store.tokens_for(account_id, TokenPurpose::Reset).len(),
        1,
        "at most one outstanding reset token per account"
    );

    let reset = ResetPasswordUseCase {
        tokens: store.clone(),
    };
    let stale = reset
        .execute(ResetPasswordInput {
            token: first,
            new_password: "newpass12".to_owned(),
        })
        .await;
    assert!(
        matches!(stale, Err(AccountsServiceError::InvalidOrExpiredToken)),
        "superseded token must not be exchangeable"
    );

    reset
        .execute(ResetPasswordInput {
            token: second,
            new_password: "newpass12".to_owned(),
        })
        .await
        .unwrap();
    assert!(verify_password(
        "newpass12",
        &store.account(account_id).unwrap().password_hash
    ));
}

#[tokio::test]
async fn should_replace_hash_and_consume_token() {
    let store = MockStore::new();
    let old_hash = hash_password("password1").unwrap();
    let account_id = store.seed_account("ada@example.com", &old_hash, true);

    let request = RequestPasswordResetUseCase {
        accounts: store.clone(),
        tokens: store.clone(),
    };
    let token = request.execute("ada@example.com").await.unwrap().unwrap();

    let reset = ResetPasswordUseCase {
        tokens: store.clone(),
    };
    reset
        .execute(ResetPasswordInput {
            token,
            new_password: "newpass12".to_owned(),
        })
        .await
        .unwrap();

    let account = store.account(account_id).unwrap();
    assert!(!verify_password("password1", &account.password_hash));
    assert!(verify_password("newpass12", &account.password_hash));
    assert_eq!(store.tokens_for(account_id, TokenPurpose::Reset).len(), 0);
}

#[tokio::test]
async fn should_reject_expired_reset_token() {
    let store = MockStore::new();
    let account_id = store.seed_account("ada@example.com", "hash", true);
    store.seed_token(account_id, "tok-stale", TokenPurpose::Reset, expired());

    let reset = ResetPasswordUseCase {
        tokens: store.clone(),
    };
    let result = reset
        .execute(ResetPasswordInput {
            token: "tok-stale".to_owned(),
            new_password: "newpass12".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(AccountsServiceError::InvalidOrExpiredToken)));
    assert_eq!(
        store.account(account_id).unwrap().password_hash,
        "hash",
        "hash must be untouched"
    );
}

#[tokio::test]
async fn should_reject_short_replacement_password() {
    let store = MockStore::new();
    let account_id = store.seed_account("ada@example.com", "hash", true);
    store.seed_token(
        account_id,
        "tok-live",
        TokenPurpose::Reset,
        Utc::now() + Duration::hours(1),
    );

    let reset = ResetPasswordUseCase {
        tokens: store.clone(),
    };
    let result = reset
        .execute(ResetPasswordInput {
            token: "tok-live".to_owned(),
            new_password: "short".to_owned(),
        })
        .await;

    assert!(matches!(result, Err(AccountsServiceError::PasswordTooShort)));
    assert_eq!(
        store.tokens_for(account_id, TokenPurpose::Reset).len(),
        1,
        "rejected exchange must not consume the token"
    );
}

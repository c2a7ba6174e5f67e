//! End-to-end account lifecycle: register → activate → login → reset →
//! login again, all against the in-memory store.

use atelier_accounts::error::AccountsServiceError;
use atelier_accounts::usecase::activate::ActivateAccountUseCase;
use atelier_accounts::usecase::authenticate::{AuthenticateInput, AuthenticateUseCase};
use atelier_accounts::usecase::password_reset::{
    RequestPasswordResetUseCase, ResetPasswordInput, ResetPasswordUseCase,
};
use atelier_accounts::usecase::register::{RegisterInput, RegisterUseCase};

use crate::helpers::MockStore;

#[tokio::test]
async fn should_walk_full_account_lifecycle() {
    let store = MockStore::new();

    // Register.
    let register = RegisterUseCase {
        accounts: store.clone(),
    };
    let output = register
        .execute(RegisterInput {
            email: "a@x.com".to_owned(),
            password: "password1".to_owned(),
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
        })
        .await
        .unwrap();

    // Activate with the validation token.
    let activate = ActivateAccountUseCase {
        tokens: store.clone(),
    };
    activate.execute(&output.token).await.unwrap();
    assert!(store.account(output.account_id).unwrap().is_active);

    // Log in with the original password.
    let authenticate = AuthenticateUseCase {
        accounts: store.clone(),
    };
    let account = authenticate
        .execute(AuthenticateInput {
            email: "a@x.com".to_owned(),
            password: "password1".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(account.id, output.account_id);

    // Request a reset and exchange the token for a new password.
    let request = RequestPasswordResetUseCase {
        accounts: store.clone(),
        tokens: store.clone(),
    };
    let reset_token = request.execute("a@x.com").await.unwrap().unwrap();

    let reset = ResetPasswordUseCase {
        tokens: store.clone(),
    };
    reset
        .execute(ResetPasswordInput {
            token: reset_token,
            new_password: "newpass12".to_owned(),
        })
        .await
        .unwrap();

    // Old password is rejected, new one accepted.
    let stale = authenticate
        .execute(AuthenticateInput {
            email: "a@x.com".to_owned(),
            password: "password1".to_owned(),
        })
        .await;
    assert!(matches!(stale, Err(AccountsServiceError::InvalidCredentials)));

    let fresh = authenticate
        .execute(AuthenticateInput {
            email: "a@x.com".to_owned(),
            password: "newpass12".to_owned(),
        })
        .await
        .unwrap();
    assert!(fresh.is_active);
}

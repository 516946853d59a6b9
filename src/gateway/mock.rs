//! Scripted gateway for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::core::identity::{
    AuthError, AuthStateHub, AuthStateListener, AuthStateSubscription, AuthUser, IdentityGateway,
};

type ScriptedResult = Result<AuthUser, AuthError>;

/// Test double returning pre-scripted results. Successful operations
/// publish to the hub the way the real gateway does; `push_auth_state`
/// simulates a provider push notification.
#[derive(Default)]
pub struct MockGateway {
    pub hub: AuthStateHub,
    popup_results: RefCell<VecDeque<ScriptedResult>>,
    password_results: RefCell<VecDeque<ScriptedResult>>,
    register_results: RefCell<VecDeque<ScriptedResult>>,
    sign_out_results: RefCell<VecDeque<Result<(), AuthError>>>,
    pub calls: RefCell<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_popup(&self, result: ScriptedResult) {
        self.popup_results.borrow_mut().push_back(result);
    }

    pub fn script_password_sign_in(&self, result: ScriptedResult) {
        self.password_results.borrow_mut().push_back(result);
    }

    pub fn script_registration(&self, result: ScriptedResult) {
        self.register_results.borrow_mut().push_back(result);
    }

    pub fn script_sign_out(&self, result: Result<(), AuthError>) {
        self.sign_out_results.borrow_mut().push_back(result);
    }

    /// Simulate a provider push notification, e.g. token expiry.
    pub fn push_auth_state(&self, user: Option<AuthUser>) {
        self.hub.publish(user);
    }

    fn next(
        &self,
        queue: &RefCell<VecDeque<ScriptedResult>>,
        call: &str,
    ) -> ScriptedResult {
        self.calls.borrow_mut().push(call.to_string());
        let result = queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(AuthError::other(format!("unscripted call: {call}"))));
        if let Ok(user) = &result {
            self.hub.publish(Some(user.clone()));
        }
        result
    }
}

#[async_trait(?Send)]
impl IdentityGateway for MockGateway {
    async fn sign_in_with_popup(&self) -> Result<AuthUser, AuthError> {
        self.next(&self.popup_results, "sign_in_with_popup")
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<AuthUser, AuthError> {
        self.next(&self.password_results, "sign_in_with_password")
    }

    async fn create_account(&self, _email: &str, _password: &str) -> Result<AuthUser, AuthError> {
        self.next(&self.register_results, "create_account")
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.calls.borrow_mut().push("sign_out".to_string());
        let result = self
            .sign_out_results
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(()));
        if result.is_ok() {
            self.hub.publish(None);
        }
        result
    }

    fn subscribe_auth_state(&self, listener: AuthStateListener) -> AuthStateSubscription {
        self.hub.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::executor::block_on;

    use super::*;
    use crate::core::identity::ErrorCode;

    fn user(email: &str, display_name: Option<&str>) -> AuthUser {
        AuthUser {
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
        }
    }

    fn record_states(gateway: &MockGateway) -> (Arc<Mutex<Vec<Option<AuthUser>>>>, AuthStateSubscription) {
        let seen: Arc<Mutex<Vec<Option<AuthUser>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = gateway.subscribe_auth_state(Box::new(move |state| {
            sink.lock().unwrap().push(state);
        }));
        (seen, subscription)
    }

    #[test]
    fn failed_sign_in_publishes_nothing() {
        let gateway = MockGateway::new();
        let (seen, _subscription) = record_states(&gateway);

        gateway.script_password_sign_in(Err(AuthError::new(
            ErrorCode::WrongPassword,
            "INVALID_PASSWORD",
        )));
        let result = block_on(gateway.sign_in_with_password("a@b.com", "wrong"));

        assert_eq!(result.unwrap_err().code, ErrorCode::WrongPassword);
        // The initial snapshot only; failures never notify.
        assert_eq!(seen.lock().unwrap().as_slice(), &[None]);
        assert_eq!(gateway.hub.current(), None);
    }

    #[test]
    fn successful_sign_in_publishes_the_returned_identity() {
        let gateway = MockGateway::new();
        let (seen, _subscription) = record_states(&gateway);

        gateway.script_password_sign_in(Ok(user("x@y.com", Some("X"))));
        let result = block_on(gateway.sign_in_with_password("x@y.com", "pw"));

        assert_eq!(result.unwrap(), user("x@y.com", Some("X")));
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[None, Some(user("x@y.com", Some("X")))]
        );
    }

    #[test]
    fn sign_out_pushes_absence() {
        let gateway = MockGateway::new();
        gateway.push_auth_state(Some(user("x@y.com", None)));
        let (seen, _subscription) = record_states(&gateway);

        block_on(gateway.sign_out()).unwrap();

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[Some(user("x@y.com", None)), None]
        );
    }

    #[test]
    fn failed_sign_out_leaves_state_alone() {
        let gateway = MockGateway::new();
        gateway.push_auth_state(Some(user("x@y.com", None)));
        gateway.script_sign_out(Err(AuthError::other("network down")));

        assert!(block_on(gateway.sign_out()).is_err());
        assert_eq!(gateway.hub.current(), Some(user("x@y.com", None)));
    }

    #[test]
    fn released_subscription_misses_later_pushes() {
        let gateway = MockGateway::new();
        let (seen, subscription) = record_states(&gateway);

        subscription.unsubscribe();
        gateway.push_auth_state(Some(user("stale@y.com", None)));

        assert_eq!(seen.lock().unwrap().as_slice(), &[None]);
    }

    #[test]
    fn unscripted_calls_fail() {
        let gateway = MockGateway::new();
        let result = block_on(gateway.sign_in_with_popup());
        assert_eq!(result.unwrap_err().code, ErrorCode::Other);
        assert_eq!(gateway.calls.borrow().as_slice(), &["sign_in_with_popup"]);
    }
}

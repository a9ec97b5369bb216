//! Tests for username validation and the in-memory identity store.

use crate::identity::{
    adapters::memory::InMemoryIdentityStore,
    domain::{IdentityDomainError, Username},
    ports::IdentityStore,
};
use rstest::rstest;

#[rstest]
#[case("alice")]
#[case("  bob  ")]
#[case("user_123")]
fn username_accepts_plain_tokens(#[case] raw: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_str(), raw.trim());
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("two words")]
#[case("tab\tseparated")]
fn username_rejects_empty_or_spaced_values(#[case] raw: &str) {
    let result = Username::new(raw);
    assert_eq!(
        result,
        Err(IdentityDomainError::InvalidUsername(raw.to_owned()))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn user_exists_reflects_registered_accounts() {
    let alice = Username::new("alice").expect("valid username");
    let ghost = Username::new("ghost_user").expect("valid username");
    let store = InMemoryIdentityStore::new();
    store.register(alice.clone()).expect("register");

    assert!(store.user_exists(&alice).await.expect("lookup"));
    assert!(!store.user_exists(&ghost).await.expect("lookup"));
}

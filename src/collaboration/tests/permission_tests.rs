//! Truth tables for the pure permission predicates.

use crate::collaboration::domain::permissions;
use crate::identity::domain::Username;
use rstest::rstest;

fn user(name: &str) -> Username {
    Username::new(name).expect("valid username")
}

#[rstest]
#[case("bob", "bob", true)]
#[case("alice", "bob", false)]
fn only_the_owner_may_add_members(
    #[case] actor: &str,
    #[case] owner: &str,
    #[case] expected: bool,
) {
    assert_eq!(
        permissions::can_add_member(&user(actor), &user(owner)),
        expected
    );
}

#[rstest]
#[case("bob", true)]
#[case("alice", true)]
#[case("carol", false)]
fn access_requires_membership(#[case] actor: &str, #[case] expected: bool) {
    let members = [user("bob"), user("alice")];
    assert_eq!(
        permissions::can_access_list(&user(actor), &members),
        expected
    );
}

#[rstest]
fn access_is_denied_on_an_empty_member_set() {
    let members: [Username; 0] = [];
    assert!(!permissions::can_access_list(&user("bob"), &members));
}

#[rstest]
#[case("alice", "alice", "bob", true)] // creator
#[case("bob", "alice", "bob", true)] // owner
#[case("carol", "alice", "bob", false)] // mere member
fn deletion_is_limited_to_creator_or_owner(
    #[case] actor: &str,
    #[case] creator: &str,
    #[case] owner: &str,
    #[case] expected: bool,
) {
    assert_eq!(
        permissions::can_delete_task(&user(actor), &user(creator), &user(owner)),
        expected
    );
}

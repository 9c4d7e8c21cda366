use crate::domain::auth::models::Principal;
use crate::domain::auth::models::Role;

/// Landing page for administrators.
pub const ADMIN_HOME: &str = "/";
/// Landing page for standard users.
pub const USER_HOME: &str = "/bidList/list";
/// Route prefix reserved for administrators.
const ADMIN_PREFIX: &str = "/user";

/// Decide the post-login redirect for an authenticated principal.
///
/// Runs exactly once per successful authentication, before the redirect
/// response is written. An unrecognized role yields `None`: the caller
/// must deny access (403), not pick a default page.
pub fn post_login_destination(principal: &Principal) -> Option<&'static str> {
    match Role::parse(&principal.role)? {
        Role::Admin => Some(ADMIN_HOME),
        Role::Standard => Some(USER_HOME),
    }
}

/// Authorization rule for an already-authenticated request.
///
/// Routes under `/user` are reserved for administrators; every other
/// route only requires a recognized role. Unauthenticated requests never
/// reach this check (the session middleware redirects them to the login
/// page first).
pub fn is_route_allowed(role: &str, path: &str) -> bool {
    let Some(role) = Role::parse(role) else {
        return false;
    };

    match role {
        Role::Admin => true,
        Role::Standard => {
            !(path == ADMIN_PREFIX || path.starts_with(&format!("{ADMIN_PREFIX}/")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: &str) -> Principal {
        Principal {
            username: "someone".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn admin_lands_on_the_home_page() {
        assert_eq!(post_login_destination(&principal("ADMIN")), Some("/"));
    }

    #[test]
    fn standard_user_lands_on_the_bid_list() {
        assert_eq!(
            post_login_destination(&principal("USER")),
            Some("/bidList/list")
        );
    }

    #[test]
    fn unrecognized_role_has_no_destination() {
        assert_eq!(post_login_destination(&principal("AUDITOR")), None);
        assert_eq!(post_login_destination(&principal("")), None);
    }

    #[test]
    fn admin_prefix_is_admin_only() {
        assert!(is_route_allowed("ADMIN", "/user/list"));
        assert!(is_route_allowed("ADMIN", "/user"));
        assert!(!is_route_allowed("USER", "/user/list"));
        assert!(!is_route_allowed("USER", "/user/delete/3"));
    }

    #[test]
    fn prefix_match_does_not_leak_onto_sibling_routes() {
        // "/users-export" shares the prefix characters but not the path.
        assert!(is_route_allowed("USER", "/users-export"));
    }

    #[test]
    fn standard_routes_accept_any_recognized_role() {
        for path in ["/", "/bidList/list", "/trade/update/7", "/rating/add"] {
            assert!(is_route_allowed("ADMIN", path));
            assert!(is_route_allowed("USER", path));
        }
    }

    #[test]
    fn unrecognized_role_is_denied_everywhere() {
        assert!(!is_route_allowed("AUDITOR", "/bidList/list"));
        assert!(!is_route_allowed("", "/"));
    }
}

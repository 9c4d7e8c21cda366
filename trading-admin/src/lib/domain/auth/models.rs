/// The authenticated identity derived from a validated login.
///
/// Carries exactly one role, copied verbatim from the stored user record
/// with no normalization. Lives for the duration of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: String,
}

/// The two roles this application routes on.
///
/// Role strings are an open set in storage; anything that does not parse
/// to one of these two variants is denied access rather than falling
/// through to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Standard,
}

impl Role {
    pub const ADMIN: &'static str = "ADMIN";
    pub const USER: &'static str = "USER";

    /// Parse a stored role string. Admin is checked first, so if a record
    /// ever carried both markers the administrative role would win.
    pub fn parse(role: &str) -> Option<Role> {
        match role {
            Self::ADMIN => Some(Role::Admin),
            Self::USER => Some(Role::Standard),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_roles_parse() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("USER"), Some(Role::Standard));
    }

    #[test]
    fn unrecognized_roles_do_not_parse() {
        assert_eq!(Role::parse("SUPERUSER"), None);
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse(""), None);
    }
}

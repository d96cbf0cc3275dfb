//! Error number definitions.
//!
//! Only the codes the fixturefs exports can report. Values follow Linux.

/// Well-known errno constants.
pub const EPERM: i32 = 1;
pub const ENOENT: i32 = 2;
pub const EIO: i32 = 5;
pub const EACCES: i32 = 13;
pub const EFAULT: i32 = 14;
pub const ENOTDIR: i32 = 20;
pub const EISDIR: i32 = 21;
pub const EINVAL: i32 = 22;

/// Short symbolic name for an errno value, used in diagnostics.
pub fn name(errno: i32) -> &'static str {
    match errno {
        EPERM => "EPERM",
        ENOENT => "ENOENT",
        EIO => "EIO",
        EACCES => "EACCES",
        EFAULT => "EFAULT",
        ENOTDIR => "ENOTDIR",
        EISDIR => "EISDIR",
        EINVAL => "EINVAL",
        _ => "E?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_names() {
        assert_eq!(name(ENOENT), "ENOENT");
        assert_eq!(name(EFAULT), "EFAULT");
        assert_eq!(name(ENOTDIR), "ENOTDIR");
    }

    #[test]
    fn unknown_code_is_placeholder() {
        assert_eq!(name(0), "E?");
        assert_eq!(name(9999), "E?");
    }
}

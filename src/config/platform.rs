//! Static per-platform descriptor table.
//!
//! Everything that used to be platform `if/else` branching lives here as
//! data: where the platform's config file sits, the path to its header map,
//! the casing of the cookie field, and its default domain. The cookie key
//! casing differs between platforms (capitalized for douyin/tiktok, lowercase
//! for bilibili); that inconsistency is source-given and must be preserved
//! per platform, never normalized.

/// Fixed, per-platform conventions consulted by the matcher and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub name: &'static str,
    /// Config file path, relative to the crawler root directory.
    pub config_path: &'static str,
    /// Path from the document root to the header map holding the cookie.
    pub header_path: &'static [&'static str],
    /// Key of the cookie field inside the header map, casing included.
    pub cookie_key: &'static str,
    pub default_domain: &'static str,
}

pub const DESCRIPTORS: &[PlatformDescriptor] = &[
    PlatformDescriptor {
        name: "douyin",
        config_path: "crawlers/douyin/web/config.yaml",
        header_path: &["TokenManager", "douyin", "headers"],
        cookie_key: "Cookie",
        default_domain: "douyin.com",
    },
    PlatformDescriptor {
        name: "tiktok",
        config_path: "crawlers/tiktok/web/config.yaml",
        header_path: &["TokenManager", "tiktok", "headers"],
        cookie_key: "Cookie",
        default_domain: "tiktok.com",
    },
    PlatformDescriptor {
        name: "bilibili",
        config_path: "crawlers/bilibili/web/config.yaml",
        header_path: &["TokenManager", "bilibili", "headers"],
        cookie_key: "cookie",
        default_domain: "bilibili.com",
    },
];

/// Look up the descriptor for a platform, `None` for unknown platforms.
pub fn descriptor(platform: &str) -> Option<&'static PlatformDescriptor> {
    DESCRIPTORS.iter().find(|d| d.name == platform)
}

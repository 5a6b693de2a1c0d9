//! Startup banner.

use std::net::SocketAddr;

use crate::consts::{AUTHOR, HOMEPAGE, REPO, VERSION};

/// Server configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub addr: SocketAddr,
    pub model: &'a str,
    pub provider_status: &'a str,
    pub cache: &'a str,
    pub cors_origin: &'a str,
}

pub fn render_banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║       P R O M P T   A N A L Y Z E R   ║
   ║   analyze and improve your prompts    ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   listen    http://{}
   model     {}
   claude    {}
   cache     {}
   cors      {}
"#,
        VERSION,
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.addr,
        info.model,
        info.provider_status,
        info.cache,
        info.cors_origin,
    )
}

/// Print the startup banner.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", render_banner(info));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_shows_settings() {
        let banner = render_banner(&BannerInfo {
            addr: "127.0.0.1:8000".parse().unwrap(),
            model: "claude-3-opus-20240229",
            provider_status: "not configured",
            cache: "redis (connected)",
            cors_origin: "http://localhost:3000",
        });
        assert!(banner.contains("http://127.0.0.1:8000"));
        assert!(banner.contains("claude-3-opus-20240229"));
        assert!(banner.contains("not configured"));
        assert!(banner.contains("redis (connected)"));
        assert!(banner.contains("http://localhost:3000"));
        assert!(banner.contains(VERSION));
    }
}

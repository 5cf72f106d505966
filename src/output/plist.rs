//! Docset bundle metadata
//!
//! Viewers identify a docset through `Contents/Info.plist`.

use crate::output::escape_text;
use crate::output::layout::{DocsetLayout, ROOT_PAGE};
use crate::{DocsetError, Result};
use std::fs;

/// Values written into `Info.plist`
#[derive(Debug, Clone)]
pub struct BundleInfo {
    pub identifier: String,
    pub name: String,
    pub platform_family: String,
}

/// Renders the property list for a bundle
pub fn render_info_plist(info: &BundleInfo) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleIdentifier</key>
	<string>{}</string>
	<key>CFBundleName</key>
	<string>{}</string>
	<key>DocSetPlatformFamily</key>
	<string>{}</string>
	<key>isDashDocset</key>
	<true/>
	<key>dashIndexFilePath</key>
	<string>{}</string>
</dict>
</plist>
"#,
        escape_text(&info.identifier),
        escape_text(&info.name),
        escape_text(&info.platform_family),
        ROOT_PAGE
    )
}

/// Writes `Contents/Info.plist`, replacing any previous one
pub fn write_info_plist(layout: &DocsetLayout, info: &BundleInfo) -> Result<()> {
    let contents = layout.contents_dir();
    fs::create_dir_all(&contents).map_err(|e| DocsetError::filesystem(&contents, e))?;

    let path = layout.info_plist_path();
    fs::write(&path, render_info_plist(info)).map_err(|e| DocsetError::filesystem(&path, e))?;

    tracing::debug!("wrote {}", path.display());
    Ok(())
}

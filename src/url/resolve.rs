use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

/// The path and fragment of an href, as written in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrefTarget {
    /// Percent-decoded path component
    pub path: String,
    /// Fragment without the leading `#`, empty when the href has none
    pub fragment: String,
}

/// Returns true for hrefs of the form `/Page`, relative to the site root
///
/// Protocol-relative hrefs (`//host/...`) are not site-relative.
pub fn is_site_relative(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

/// Derives the file name a page is saved under from its URL
///
/// The name is the last non-empty path segment, decoded, plus `.html`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sdl_docset::url::page_file_name;
///
/// let url = Url::parse("https://wiki.libsdl.org/SDL_Init").unwrap();
/// assert_eq!(page_file_name(&url), Some("SDL_Init.html".to_string()));
///
/// let url = Url::parse("https://wiki.libsdl.org/").unwrap();
/// assert_eq!(page_file_name(&url), None);
/// ```
pub fn page_file_name(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;
    let name = percent_decode_str(segment).decode_utf8_lossy();

    // A decoded separator would escape the category directory
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return None;
    }

    Some(format!("{}.html", name))
}

/// Splits an href into its path and fragment without resolving it
///
/// Absolute URLs keep their own path whatever their host is. Relative
/// references keep the path exactly as written, so `SDL_Init` stays
/// `SDL_Init` and `/SDL_Init` stays `/SDL_Init`. Returns None for hrefs that
/// are not valid URL references.
///
/// # Examples
///
/// ```
/// use sdl_docset::url::parse_href;
///
/// let target = parse_href("/SDL_Init#Remarks").unwrap();
/// assert_eq!(target.path, "/SDL_Init");
/// assert_eq!(target.fragment, "Remarks");
/// ```
pub fn parse_href(href: &str) -> Option<HrefTarget> {
    let href = href.trim();

    match Url::parse(href) {
        Ok(url) => Some(HrefTarget {
            path: decode(url.path()),
            fragment: url.fragment().unwrap_or_default().to_string(),
        }),
        Err(ParseError::RelativeUrlWithoutBase) => Some(split_reference(href)),
        Err(_) => None,
    }
}

/// Splits a relative reference into path and fragment
fn split_reference(reference: &str) -> HrefTarget {
    let (rest, fragment) = reference.split_once('#').unwrap_or((reference, ""));
    let rest = rest.split_once('?').map_or(rest, |(path, _)| path);

    // Network-path reference: the authority is not part of the path
    let path = match rest.strip_prefix("//") {
        Some(authority_and_path) => authority_and_path
            .find('/')
            .map_or("", |slash| &authority_and_path[slash..]),
        None => rest,
    };

    HrefTarget {
        path: decode(path),
        fragment: fragment.to_string(),
    }
}

fn decode(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

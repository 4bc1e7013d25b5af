//! Content type detection, comment styles and fence tags
//!
//! Content types are editor language identifiers (`rust`, `python`,
//! `shellscript`, ...). They are only used to pick the comment syntax of the
//! line that names a file inside its fenced block.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Serialize;
use strum::{Display, EnumIter};

/// Content type used when nothing in the tables matches
pub const PLAINTEXT: &str = "plaintext";

/// Line comment syntaxes used to label a file block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum CommentStyle {
    #[strum(serialize = "//")]
    #[serde(rename = "//")]
    DoubleSlash,
    #[strum(serialize = "#")]
    #[serde(rename = "#")]
    Hash,
    #[strum(serialize = "<!--")]
    #[serde(rename = "<!--")]
    Html,
    #[strum(serialize = "/*")]
    #[serde(rename = "/*")]
    SlashStar,
}

impl CommentStyle {
    /// Opening token
    pub fn open(&self) -> &'static str {
        match self {
            CommentStyle::DoubleSlash => "//",
            CommentStyle::Hash => "#",
            CommentStyle::Html => "<!--",
            CommentStyle::SlashStar => "/*",
        }
    }

    /// Closing token, if the syntax needs one
    pub fn close(&self) -> Option<&'static str> {
        match self {
            CommentStyle::DoubleSlash | CommentStyle::Hash => None,
            CommentStyle::Html => Some("-->"),
            CommentStyle::SlashStar => Some("*/"),
        }
    }

    /// Wrap `text` in a one-line comment
    pub fn wrap(&self, text: &str) -> String {
        match self.close() {
            Some(close) => format!("{} {} {}", self.open(), text, close),
            None => format!("{} {}", self.open(), text),
        }
    }
}

const DOUBLE_SLASH_TYPES: &[&str] = &[
    "c",
    "cpp",
    "csharp",
    "dart",
    "elixir",
    "go",
    "java",
    "javascript",
    "kotlin",
    "perl",
    "php",
    "rust",
    "swift",
    "typescript",
];

const HASH_TYPES: &[&str] = &[
    "powershell",
    "bat",
    "apacheconf",
    "cmake",
    "dockerfile",
    "fish",
    "ini",
    "lua",
    "makefile",
    "perl6",
    "pig",
    "properties",
    "jade",
    "python",
    "r",
    "ruby",
    "shellscript",
    "sql",
    "yaml",
];

const HTML_TYPES: &[&str] = &[
    "html",
    "xml",
    "svg",
    "xsl",
    "xhtml",
    "vue",
    "handlebars",
    "svelte",
];

const SLASH_STAR_TYPES: &[&str] = &["css", "sass", "less"];

/// Content type -> comment style
static COMMENT_STYLES: Lazy<HashMap<&'static str, CommentStyle>> = Lazy::new(|| {
    let groups = [
        (DOUBLE_SLASH_TYPES, CommentStyle::DoubleSlash),
        (HASH_TYPES, CommentStyle::Hash),
        (HTML_TYPES, CommentStyle::Html),
        (SLASH_STAR_TYPES, CommentStyle::SlashStar),
    ];

    let mut map = HashMap::new();
    for (types, style) in groups {
        for content_type in types {
            // First group wins, so a type listed twice keeps its earlier style
            map.entry(*content_type).or_insert(style);
        }
    }
    map
});

/// Lowercased extension -> content type
static EXTENSION_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("cc", "cpp"),
        ("cxx", "cpp"),
        ("hpp", "cpp"),
        ("hh", "cpp"),
        ("hxx", "cpp"),
        ("cs", "csharp"),
        ("dart", "dart"),
        ("ex", "elixir"),
        ("exs", "elixir"),
        ("go", "go"),
        ("java", "java"),
        ("js", "javascript"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("jsx", "javascriptreact"),
        ("kt", "kotlin"),
        ("kts", "kotlin"),
        ("pl", "perl"),
        ("pm", "perl"),
        ("php", "php"),
        ("rs", "rust"),
        ("swift", "swift"),
        ("ts", "typescript"),
        ("mts", "typescript"),
        ("cts", "typescript"),
        ("tsx", "typescriptreact"),
        ("ps1", "powershell"),
        ("psm1", "powershell"),
        ("psd1", "powershell"),
        ("bat", "bat"),
        ("cmd", "bat"),
        ("cmake", "cmake"),
        ("dockerfile", "dockerfile"),
        ("fish", "fish"),
        ("ini", "ini"),
        ("lua", "lua"),
        ("mk", "makefile"),
        ("mak", "makefile"),
        ("p6", "perl6"),
        ("pl6", "perl6"),
        ("pm6", "perl6"),
        ("raku", "perl6"),
        ("pig", "pig"),
        ("properties", "properties"),
        ("jade", "jade"),
        ("pug", "jade"),
        ("py", "python"),
        ("pyw", "python"),
        ("pyi", "python"),
        ("r", "r"),
        ("rb", "ruby"),
        ("gemspec", "ruby"),
        ("sh", "shellscript"),
        ("bash", "shellscript"),
        ("zsh", "shellscript"),
        ("ksh", "shellscript"),
        ("sql", "sql"),
        ("yml", "yaml"),
        ("yaml", "yaml"),
        ("html", "html"),
        ("htm", "html"),
        ("xml", "xml"),
        ("xsd", "xml"),
        ("plist", "xml"),
        ("csproj", "xml"),
        ("svg", "svg"),
        ("xsl", "xsl"),
        ("xslt", "xsl"),
        ("xhtml", "xhtml"),
        ("vue", "vue"),
        ("hbs", "handlebars"),
        ("handlebars", "handlebars"),
        ("svelte", "svelte"),
        ("css", "css"),
        ("sass", "sass"),
        ("scss", "scss"),
        ("less", "less"),
        ("md", "markdown"),
        ("markdown", "markdown"),
        ("json", "json"),
        ("toml", "toml"),
        ("txt", PLAINTEXT),
    ])
});

/// Exact basename -> content type, checked before extensions
static FILENAME_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Makefile", "makefile"),
        ("makefile", "makefile"),
        ("GNUmakefile", "makefile"),
        ("Dockerfile", "dockerfile"),
        ("Containerfile", "dockerfile"),
        ("CMakeLists.txt", "cmake"),
        (".htaccess", "apacheconf"),
        ("httpd.conf", "apacheconf"),
        ("Gemfile", "ruby"),
        ("Rakefile", "ruby"),
        (".bashrc", "shellscript"),
        (".bash_profile", "shellscript"),
        (".profile", "shellscript"),
        (".zshrc", "shellscript"),
        (".gitconfig", "properties"),
        (".editorconfig", "properties"),
    ])
});

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Classify a file the way an editor would for syntax highlighting.
///
/// Well-known basenames win over extensions; anything unknown is
/// [`PLAINTEXT`].
pub fn detect_content_type(path: &Path) -> &'static str {
    let name = basename(path);
    if let Some(&content_type) = FILENAME_TYPES.get(name.as_str()) {
        return content_type;
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .and_then(|ext| EXTENSION_TYPES.get(ext.as_str()).copied())
        .unwrap_or(PLAINTEXT)
}

/// Comment style for a content type, `//` when the type is not mapped
pub fn comment_style(content_type: &str) -> CommentStyle {
    COMMENT_STYLES
        .get(content_type)
        .copied()
        .unwrap_or(CommentStyle::DoubleSlash)
}

/// Fence language tag: text after the last `.` of the basename.
///
/// A basename without a dot is used whole, so `Makefile` stays `Makefile`.
pub fn fence_tag(path: &Path) -> String {
    let name = basename(path);
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_comment_table() {
        assert_eq!(comment_style("rust"), CommentStyle::DoubleSlash);
        assert_eq!(comment_style("perl"), CommentStyle::DoubleSlash);
        assert_eq!(comment_style("python"), CommentStyle::Hash);
        assert_eq!(comment_style("makefile"), CommentStyle::Hash);
        assert_eq!(comment_style("shellscript"), CommentStyle::Hash);
        assert_eq!(comment_style("svelte"), CommentStyle::Html);
        assert_eq!(comment_style("xml"), CommentStyle::Html);
        assert_eq!(comment_style("less"), CommentStyle::SlashStar);

        // Unmapped types fall back to `//`
        assert_eq!(comment_style("markdown"), CommentStyle::DoubleSlash);
        assert_eq!(comment_style("scss"), CommentStyle::DoubleSlash);
        assert_eq!(comment_style(PLAINTEXT), CommentStyle::DoubleSlash);
        assert_eq!(comment_style(""), CommentStyle::DoubleSlash);
    }

    #[test]
    fn test_comment_wrap() {
        assert_eq!(CommentStyle::DoubleSlash.wrap("src/main.rs"), "// src/main.rs");
        assert_eq!(CommentStyle::Hash.wrap("script.py"), "# script.py");
        assert_eq!(CommentStyle::Html.wrap("index.html"), "<!-- index.html -->");
        assert_eq!(CommentStyle::SlashStar.wrap("site.css"), "/* site.css */");
    }

    #[test]
    fn test_display_matches_open_token() {
        for style in CommentStyle::iter() {
            assert_eq!(style.to_string(), style.open());
        }
    }

    #[test]
    fn test_detect_content_type() {
        assert_eq!(detect_content_type(Path::new("/a/script.py")), "python");
        assert_eq!(detect_content_type(Path::new("lib.RS")), "rust");
        assert_eq!(detect_content_type(Path::new("dir/Makefile")), "makefile");
        assert_eq!(detect_content_type(Path::new("Dockerfile")), "dockerfile");
        assert_eq!(detect_content_type(Path::new("CMakeLists.txt")), "cmake");
        assert_eq!(detect_content_type(Path::new("notes.txt")), PLAINTEXT);
        assert_eq!(detect_content_type(Path::new("data.unknownext")), PLAINTEXT);
        assert_eq!(detect_content_type(Path::new("LICENSE")), PLAINTEXT);
    }

    #[test]
    fn test_fence_tag() {
        assert_eq!(fence_tag(Path::new("script.py")), "py");
        assert_eq!(fence_tag(Path::new("/home/me/proj.v2/Makefile")), "Makefile");
        assert_eq!(fence_tag(Path::new("archive.tar.gz")), "gz");
        assert_eq!(fence_tag(Path::new(".gitignore")), "gitignore");
        assert_eq!(fence_tag(Path::new("src/lib.rs")), "rs");
    }
}

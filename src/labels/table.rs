//! Static content-type table.
//!
//! Priorities follow the order of this table: concrete formats first, text
//! formats next, the generic `txt` / `unknown` fallbacks and the inode-level
//! labels last.

use phf::phf_map;

use super::registry::LabelEntry;

pub(super) static LABELS: phf::Map<&'static str, LabelEntry> = phf_map! {
    "png" => LabelEntry {
        label: "png",
        mime_type: "image/png",
        group: "image",
        description: "PNG image data",
        extensions: &["png"],
        is_text: false,
        priority: 0,
    },
    "jpeg" => LabelEntry {
        label: "jpeg",
        mime_type: "image/jpeg",
        group: "image",
        description: "JPEG image data",
        extensions: &["jpg", "jpeg"],
        is_text: false,
        priority: 1,
    },
    "gif" => LabelEntry {
        label: "gif",
        mime_type: "image/gif",
        group: "image",
        description: "GIF image data",
        extensions: &["gif"],
        is_text: false,
        priority: 2,
    },
    "bmp" => LabelEntry {
        label: "bmp",
        mime_type: "image/bmp",
        group: "image",
        description: "BMP image data",
        extensions: &["bmp", "dib"],
        is_text: false,
        priority: 3,
    },
    "webp" => LabelEntry {
        label: "webp",
        mime_type: "image/webp",
        group: "image",
        description: "WebP image data",
        extensions: &["webp"],
        is_text: false,
        priority: 4,
    },
    "tiff" => LabelEntry {
        label: "tiff",
        mime_type: "image/tiff",
        group: "image",
        description: "TIFF image data",
        extensions: &["tiff", "tif"],
        is_text: false,
        priority: 5,
    },
    "ico" => LabelEntry {
        label: "ico",
        mime_type: "image/vnd.microsoft.icon",
        group: "image",
        description: "MS Windows icon resource",
        extensions: &["ico"],
        is_text: false,
        priority: 6,
    },
    "pdf" => LabelEntry {
        label: "pdf",
        mime_type: "application/pdf",
        group: "document",
        description: "PDF document",
        extensions: &["pdf"],
        is_text: false,
        priority: 7,
    },
    "sqlite" => LabelEntry {
        label: "sqlite",
        mime_type: "application/x-sqlite3",
        group: "application",
        description: "SQLite database",
        extensions: &["sqlite", "sqlite3", "db"],
        is_text: false,
        priority: 8,
    },
    "zip" => LabelEntry {
        label: "zip",
        mime_type: "application/zip",
        group: "archive",
        description: "Zip archive data",
        extensions: &["zip"],
        is_text: false,
        priority: 9,
    },
    "gzip" => LabelEntry {
        label: "gzip",
        mime_type: "application/gzip",
        group: "archive",
        description: "gzip compressed data",
        extensions: &["gz", "gzip"],
        is_text: false,
        priority: 10,
    },
    "bzip" => LabelEntry {
        label: "bzip",
        mime_type: "application/x-bzip2",
        group: "archive",
        description: "bzip2 compressed data",
        extensions: &["bz2", "tbz2"],
        is_text: false,
        priority: 11,
    },
    "xz" => LabelEntry {
        label: "xz",
        mime_type: "application/x-xz",
        group: "archive",
        description: "XZ compressed data",
        extensions: &["xz"],
        is_text: false,
        priority: 12,
    },
    "7zip" => LabelEntry {
        label: "7zip",
        mime_type: "application/x-7z-compressed",
        group: "archive",
        description: "7-zip archive data",
        extensions: &["7z"],
        is_text: false,
        priority: 13,
    },
    "rar" => LabelEntry {
        label: "rar",
        mime_type: "application/x-rar",
        group: "archive",
        description: "RAR archive data",
        extensions: &["rar"],
        is_text: false,
        priority: 14,
    },
    "zstd" => LabelEntry {
        label: "zstd",
        mime_type: "application/zstd",
        group: "archive",
        description: "Zstandard compressed data",
        extensions: &["zst"],
        is_text: false,
        priority: 15,
    },
    "elf" => LabelEntry {
        label: "elf",
        mime_type: "application/x-executable-elf",
        group: "executable",
        description: "ELF executable",
        extensions: &["elf", "so"],
        is_text: false,
        priority: 16,
    },
    "pebin" => LabelEntry {
        label: "pebin",
        mime_type: "application/x-dosexec",
        group: "executable",
        description: "PE Windows executable",
        extensions: &["exe", "dll", "sys"],
        is_text: false,
        priority: 17,
    },
    "macho" => LabelEntry {
        label: "macho",
        mime_type: "application/x-mach-o",
        group: "executable",
        description: "Mach-O executable",
        extensions: &["dylib", "bundle"],
        is_text: false,
        priority: 18,
    },
    "javabytecode" => LabelEntry {
        label: "javabytecode",
        mime_type: "application/x-java-applet",
        group: "executable",
        description: "Java compiled bytecode",
        extensions: &["class"],
        is_text: false,
        priority: 19,
    },
    "wasm" => LabelEntry {
        label: "wasm",
        mime_type: "application/wasm",
        group: "executable",
        description: "WebAssembly binary",
        extensions: &["wasm"],
        is_text: false,
        priority: 20,
    },
    "mp3" => LabelEntry {
        label: "mp3",
        mime_type: "audio/mpeg",
        group: "audio",
        description: "MP3 media file",
        extensions: &["mp3"],
        is_text: false,
        priority: 21,
    },
    "ogg" => LabelEntry {
        label: "ogg",
        mime_type: "audio/ogg",
        group: "audio",
        description: "Ogg data",
        extensions: &["ogg", "oga", "opus"],
        is_text: false,
        priority: 22,
    },
    "flac" => LabelEntry {
        label: "flac",
        mime_type: "audio/flac",
        group: "audio",
        description: "FLAC audio bitstream data",
        extensions: &["flac"],
        is_text: false,
        priority: 23,
    },
    "wav" => LabelEntry {
        label: "wav",
        mime_type: "audio/x-wav",
        group: "audio",
        description: "Waveform Audio file (WAV)",
        extensions: &["wav"],
        is_text: false,
        priority: 24,
    },
    "avi" => LabelEntry {
        label: "avi",
        mime_type: "video/x-msvideo",
        group: "video",
        description: "RIFF AVI data",
        extensions: &["avi"],
        is_text: false,
        priority: 25,
    },
    "mp4" => LabelEntry {
        label: "mp4",
        mime_type: "video/mp4",
        group: "video",
        description: "MP4 media file",
        extensions: &["mp4", "m4v", "m4a"],
        is_text: false,
        priority: 26,
    },
    "mkv" => LabelEntry {
        label: "mkv",
        mime_type: "video/x-matroska",
        group: "video",
        description: "Matroska media container",
        extensions: &["mkv", "webm"],
        is_text: false,
        priority: 27,
    },
    "rtf" => LabelEntry {
        label: "rtf",
        mime_type: "text/rtf",
        group: "text",
        description: "Rich Text Format document",
        extensions: &["rtf"],
        is_text: true,
        priority: 28,
    },
    "html" => LabelEntry {
        label: "html",
        mime_type: "text/html",
        group: "code",
        description: "HTML document",
        extensions: &["html", "htm", "xhtml"],
        is_text: true,
        priority: 29,
    },
    "svg" => LabelEntry {
        label: "svg",
        mime_type: "image/svg+xml",
        group: "image",
        description: "SVG Scalable Vector Graphics image data",
        extensions: &["svg"],
        is_text: true,
        priority: 30,
    },
    "php" => LabelEntry {
        label: "php",
        mime_type: "text/x-php",
        group: "code",
        description: "PHP source",
        extensions: &["php"],
        is_text: true,
        priority: 31,
    },
    "xml" => LabelEntry {
        label: "xml",
        mime_type: "text/xml",
        group: "code",
        description: "XML document",
        extensions: &["xml"],
        is_text: true,
        priority: 32,
    },
    "shell" => LabelEntry {
        label: "shell",
        mime_type: "text/x-shellscript",
        group: "code",
        description: "Shell script",
        extensions: &["sh", "bash"],
        is_text: true,
        priority: 33,
    },
    "pem" => LabelEntry {
        label: "pem",
        mime_type: "application/x-pem-file",
        group: "text",
        description: "PEM certificate or key",
        extensions: &["pem", "crt", "key"],
        is_text: true,
        priority: 34,
    },
    "json" => LabelEntry {
        label: "json",
        mime_type: "application/json",
        group: "code",
        description: "JSON document",
        extensions: &["json"],
        is_text: true,
        priority: 35,
    },
    "txt" => LabelEntry {
        label: "txt",
        mime_type: "text/plain",
        group: "text",
        description: "Generic text document",
        extensions: &["txt"],
        is_text: true,
        priority: 36,
    },
    "unknown" => LabelEntry {
        label: "unknown",
        mime_type: "application/octet-stream",
        group: "unknown",
        description: "Unknown binary data",
        extensions: &[],
        is_text: false,
        priority: 37,
    },
    "empty" => LabelEntry {
        label: "empty",
        mime_type: "inode/x-empty",
        group: "inode",
        description: "Empty file",
        extensions: &[],
        is_text: false,
        priority: 38,
    },
    "directory" => LabelEntry {
        label: "directory",
        mime_type: "inode/directory",
        group: "inode",
        description: "A directory",
        extensions: &[],
        is_text: false,
        priority: 39,
    },
};

//! 上传文件内容校验
//!
//! 扩展名只是声明，真正接受与否取决于文件头的魔术字节。

use crate::models::contents::entities::ContentType;

/// 魔术字节是否与扩展名（含点号，如 ".mp4"）一致
///
/// `data` 只需文件开头的若干字节，空数据一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 视频
        ".mp4" | ".m4v" | ".mov" => is_iso_media(data),
        ".webm" | ".mkv" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),

        // 图片
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),

        // 文档与压缩包（OOXML 本身就是 zip）
        ".pdf" => data.starts_with(b"%PDF"),
        ".zip" | ".docx" | ".pptx" | ".xlsx" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),

        // 纯文本：开头部分必须是 UTF-8 且不含 NUL
        ".txt" | ".md" | ".csv" => is_plain_text(data),

        _ => false,
    }
}

/// 根据扩展名推断资料类型，用于未显式指定 content_type 的上传
pub fn infer_content_type(extension: &str) -> ContentType {
    match extension.to_lowercase().as_str() {
        ".mp4" | ".m4v" | ".mov" | ".webm" | ".mkv" => ContentType::Video,
        ".pdf" => ContentType::Pdf,
        _ => ContentType::Other,
    }
}

// ISO base media（mp4/mov）在偏移 4 处是 "ftyp" box
fn is_iso_media(data: &[u8]) -> bool {
    data.len() >= 8 && &data[4..8] == b"ftyp"
}

fn is_plain_text(data: &[u8]) -> bool {
    if data.contains(&0) {
        return false;
    }
    match std::str::from_utf8(data) {
        Ok(_) => true,
        // 截断处可能正好切在多字节字符中间
        Err(e) => e.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_magic() {
        let mp4 = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&mp4, ".mp4"));
        assert!(validate_magic_bytes(&mp4, ".MOV"));
        assert!(!validate_magic_bytes(&mp4, ".webm"));

        let webm = [0x1A, 0x45, 0xDF, 0xA3, 0x9F];
        assert!(validate_magic_bytes(&webm, ".webm"));
        assert!(validate_magic_bytes(&webm, ".mkv"));
        assert!(!validate_magic_bytes(&webm, ".mp4"));
    }

    #[test]
    fn test_pdf_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".zip"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".pdf"));
    }

    #[test]
    fn test_text_files() {
        assert!(validate_magic_bytes(b"# Week 1 notes", ".md"));
        assert!(validate_magic_bytes("caf\u{e9}".as_bytes(), ".txt"));
        // 多字节字符被截断
        assert!(validate_magic_bytes(&[b'a', 0xE4, 0xB8], ".txt"));
        assert!(!validate_magic_bytes(&[b'a', 0x00, b'b'], ".txt"));
        assert!(!validate_magic_bytes(&[0xFF, 0xFE, 0x41], ".txt"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".pdf"));
        assert!(!validate_magic_bytes(&[0x4D, 0x5A], ".exe"));
    }

    #[test]
    fn test_infer_content_type() {
        assert_eq!(infer_content_type(".MP4"), ContentType::Video);
        assert_eq!(infer_content_type(".pdf"), ContentType::Pdf);
        assert_eq!(infer_content_type(".pptx"), ContentType::Other);
    }
}

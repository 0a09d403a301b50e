/// 验证文件内容的魔术字节是否与声明的 MIME 类型匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节（至少 12 字节才能识别全部格式）
/// * `mime_type` - 客户端声明的 MIME 类型
///
/// # Returns
/// * `true` - 魔术字节匹配
/// * `false` - 魔术字节不匹配或类型未知
pub fn validate_magic_bytes(data: &[u8], mime_type: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match mime_type.to_lowercase().as_str() {
        // 视频格式
        "video/mp4" | "video/quicktime" => {
            // ISO BMFF：偏移 4 处为 box 类型
            data.len() >= 8 && matches!(&data[4..8], b"ftyp" | b"moov" | b"mdat" | b"wide" | b"free")
        }
        "video/webm" | "video/x-matroska" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),
        "video/x-msvideo" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"AVI ",
        "video/mpeg" => {
            data.starts_with(&[0x00, 0x00, 0x01, 0xBA]) || data.starts_with(&[0x00, 0x00, 0x01, 0xB3])
        }

        // 图片格式
        "image/png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        "image/jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "image/webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",

        // 文档格式
        "application/pdf" => data.starts_with(b"%PDF"),
        "application/msword" => {
            // MS Office 旧格式 (OLE Compound Document)
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            // MS Office 新格式 (ZIP-based OOXML)
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

/// 根据 MIME 类型推断保存时使用的扩展名
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        "video/mp4" => ".mp4",
        "video/quicktime" => ".mov",
        "video/webm" => ".webm",
        "video/x-matroska" => ".mkv",
        "video/x-msvideo" => ".avi",
        "video/mpeg" => ".mpeg",
        "image/png" => ".png",
        "image/jpeg" => ".jpg",
        "image/webp" => ".webp",
        "application/pdf" => ".pdf",
        "application/msword" => ".doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => ".docx",
        _ => ".bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mp4_magic() {
        let header = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&header, "video/mp4"));
        assert!(validate_magic_bytes(&header, "VIDEO/MP4"));
        assert!(!validate_magic_bytes(&header, "video/webm"));
    }

    #[test]
    fn test_webm_magic() {
        let header = [0x1A, 0x45, 0xDF, 0xA3, 0x9F, 0x42, 0x86, 0x81];
        assert!(validate_magic_bytes(&header, "video/webm"));
        assert!(validate_magic_bytes(&header, "video/x-matroska"));
        assert!(!validate_magic_bytes(&header, "video/mp4"));
    }

    #[test]
    fn test_avi_and_webp_share_riff() {
        let avi = *b"RIFF\x00\x00\x00\x00AVI LIST";
        let webp = *b"RIFF\x00\x00\x00\x00WEBPVP8 ";
        assert!(validate_magic_bytes(&avi, "video/x-msvideo"));
        assert!(!validate_magic_bytes(&avi, "image/webp"));
        assert!(validate_magic_bytes(&webp, "image/webp"));
        assert!(!validate_magic_bytes(&webp, "video/x-msvideo"));
    }

    #[test]
    fn test_cv_formats() {
        assert!(validate_magic_bytes(b"%PDF-1.7", "application/pdf"));
        assert!(validate_magic_bytes(
            &[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        ));
        assert!(!validate_magic_bytes(b"%PDF-1.7", "application/msword"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, "image/jpeg"));
        assert!(!validate_magic_bytes(&jpeg_header, "image/png"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], "video/mp4"));
    }

    #[test]
    fn test_unknown_type() {
        let data = [0x4D, 0x5A, 0x90, 0x00];
        assert!(!validate_magic_bytes(&data, "application/x-msdownload"));
    }

    #[test]
    fn test_extension_for_mime() {
        assert_eq!(extension_for_mime("video/quicktime"), ".mov");
        assert_eq!(extension_for_mime("application/octet-stream"), ".bin");
    }
}

use std::sync::Arc;

/// 录音数据（不透明的二进制句柄）
///
/// 克隆只增加引用计数，两个并发的服务调用可以共享同一份音频
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    data: Arc<[u8]>,
    file_name: String,
    mime_type: String,
}

impl AudioClip {
    pub fn new(
        data: impl Into<Arc<[u8]>>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// 浏览器录音的默认格式
    pub fn webm(data: impl Into<Arc<[u8]>>) -> Self {
        Self::new(data, "audio.webm", "audio/webm")
    }

    /// 按文件扩展名推断 MIME 类型
    pub fn from_path_bytes(path: &str, data: Vec<u8>) -> Self {
        let file_name = std::path::Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.webm".to_string());

        let mime_type = match file_name.rsplit('.').next().map(str::to_ascii_lowercase) {
            Some(ext) if ext == "wav" => "audio/wav",
            Some(ext) if ext == "mp3" => "audio/mpeg",
            Some(ext) if ext == "ogg" => "audio/ogg",
            Some(ext) if ext == "m4a" => "audio/mp4",
            _ => "audio/webm",
        };

        Self::new(data, file_name, mime_type)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        let clip = AudioClip::from_path_bytes("clips/answer.WAV", vec![1, 2, 3]);
        assert_eq!(clip.file_name(), "answer.WAV");
        assert_eq!(clip.mime_type(), "audio/wav");
        assert_eq!(clip.len(), 3);

        let clip = AudioClip::from_path_bytes("recording", Vec::new());
        assert_eq!(clip.mime_type(), "audio/webm");
        assert!(clip.is_empty());
    }

    #[test]
    fn test_clone_shares_bytes() {
        let clip = AudioClip::webm(vec![7u8; 16]);
        let copy = clip.clone();
        assert_eq!(clip.bytes().as_ptr(), copy.bytes().as_ptr());
    }
}

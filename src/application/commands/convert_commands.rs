//! Convert Commands - 泰文 → 中文语音转换命令

use crate::domain::conversion::AudioFileName;

/// 转换命令
#[derive(Debug, Clone)]
pub struct ConvertCommand {
    /// 泰文输入（未修剪）
    pub text: String,
    /// 音色 id；为空时使用默认音色
    pub voice: Option<String>,
}

/// 转换响应
#[derive(Debug, Clone)]
pub struct ConvertResponse {
    /// 修剪后的泰文
    pub thai: String,
    /// 中文译文
    pub chinese: String,
    /// 产生译文的翻译器名称
    pub translator: String,
    /// 实际使用的音色 id
    pub voice_id: String,
    /// 生成（或复用）的音频文件
    pub audio_file: AudioFileName,
    /// 是否复用了已有音频
    pub reused: bool,
}

//! 消息方向
//!
//! 解码服务给出的方向是自由文本（"uplink"、"UL_DCCH"、"Downlink (eNB → UE)" 等），
//! 这里统一归一为四种取值：能识别的上/下行、解码器的其它信道标记（如 "CCCH"），
//! 以及缺失或字面 "unknown" 的未知方向。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "&'static str")]
pub enum Direction {
    Uplink,
    Downlink,
    /// 非空但无法识别为上/下行；仍然画箭头，路径按各规则的兜底分支解析
    Other,
    #[default]
    Unknown,
}

impl Direction {
    /// 大小写不敏感的子串匹配；uplink 优先于 downlink。只有空串和 "unknown" 算未知。
    ///
    /// PCCH/BCCH 是只有下行的广播信道，因此按 downlink 处理。
    pub fn parse(raw: &str) -> Direction {
        let s = raw.trim().to_ascii_lowercase();
        if s.is_empty() || s == "unknown" {
            return Direction::Unknown;
        }
        if s.contains("uplink") || s.contains("ul") {
            Direction::Uplink
        } else if s.contains("downlink")
            || s.contains("dl")
            || s.contains("pcch")
            || s.contains("bcch")
        {
            Direction::Downlink
        } else {
            Direction::Other
        }
    }

    pub fn is_known(self) -> bool {
        self != Direction::Unknown
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Uplink => "uplink",
            Direction::Downlink => "downlink",
            Direction::Other => "other",
            Direction::Unknown => "unknown",
        }
    }
}

impl From<Option<String>> for Direction {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(Direction::parse).unwrap_or_default()
    }
}

impl From<Direction> for &'static str {
    fn from(d: Direction) -> Self {
        d.as_str()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! 协议栈层
//!
//! 固定的九层栈，从 NAS 到 IP；识别结果总是按栈序输出。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Nas,
    Rrc,
    Pdcp,
    Rlc,
    Mac,
    Phy,
    S1ap,
    Sctp,
    Ip,
}

impl Layer {
    pub const STACK: [Layer; 9] = [
        Layer::Nas,
        Layer::Rrc,
        Layer::Pdcp,
        Layer::Rlc,
        Layer::Mac,
        Layer::Phy,
        Layer::S1ap,
        Layer::Sctp,
        Layer::Ip,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Layer::Nas => "NAS",
            Layer::Rrc => "RRC",
            Layer::Pdcp => "PDCP",
            Layer::Rlc => "RLC",
            Layer::Mac => "MAC",
            Layer::Phy => "PHY",
            Layer::S1ap => "S1AP",
            Layer::Sctp => "SCTP",
            Layer::Ip => "IP",
        }
    }

    /// 栈中位于本层之下的各层（按栈序）
    pub fn below(self) -> impl Iterator<Item = Layer> {
        Layer::STACK.into_iter().skip_while(move |l| *l != self).skip(1)
    }

    /// 信息面板里展示的一句话说明
    pub fn description(self) -> &'static str {
        match self {
            Layer::Nas => "Non-Access Stratum - mobility and session management",
            Layer::Rrc => "Radio Resource Control - connection setup and configuration",
            Layer::Pdcp => "Packet Data Convergence Protocol - header compression and ciphering",
            Layer::Rlc => "Radio Link Control - segmentation and retransmission",
            Layer::Mac => "Medium Access Control - scheduling and multiple access",
            Layer::Phy => "Physical Layer - RF signalling and modulation",
            Layer::S1ap => "S1 Application Protocol - S1 interface signalling",
            Layer::Sctp => "Stream Control Transmission Protocol - reliable transport",
            Layer::Ip => "Internet Protocol - network layer routing",
        }
    }
}

/// 一条层识别规则：`tag` 匹配 protocol/messageType，`keywords` 匹配自由文本内容。
pub(crate) struct LayerRule {
    pub layer: Layer,
    pub tag: &'static str,
    pub keywords: &'static [&'static str],
}

/// 按栈序排列；RLC、S1AP、SCTP、IP 没有识别规则，只出现在栈定义中。
pub(crate) const LAYER_RULES: &[LayerRule] = &[
    LayerRule {
        layer: Layer::Nas,
        tag: "nas",
        keywords: &["attach", "authentication", "security", "emm", "esm"],
    },
    LayerRule {
        layer: Layer::Rrc,
        tag: "rrc",
        keywords: &["connection", "setup", "reconfiguration", "measurement"],
    },
    LayerRule {
        layer: Layer::Pdcp,
        tag: "pdcp",
        keywords: &["pdcp", "compression", "ciphering"],
    },
    LayerRule {
        layer: Layer::Mac,
        tag: "mac",
        keywords: &["scheduling", "harq", "random access"],
    },
    LayerRule {
        layer: Layer::Phy,
        tag: "phy",
        keywords: &["physical", "channel", "signal"],
    },
];

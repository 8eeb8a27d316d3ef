//! 消息说明文本与箭头配色

use super::classifier::Classification;
use crate::model::{Direction, Message};
use serde::{Deserialize, Serialize};

const MESSAGE_EXPLANATIONS: &[(&str, &str)] = &[
    (
        "Attach Request",
        "The UE sends this to register with the network; first step of the initial attach.",
    ),
    (
        "Attach Accept",
        "The network accepts the attach request and returns the parameters the UE needs.",
    ),
    (
        "Authentication Request",
        "The network challenges the UE to prove its identity.",
    ),
    (
        "Authentication Response",
        "The UE answers the authentication challenge.",
    ),
    (
        "Security Mode Command",
        "The network orders the UE to activate NAS security.",
    ),
    (
        "Security Mode Complete",
        "The UE confirms that the security mode is active.",
    ),
    (
        "ESM Information Request",
        "The network asks for EPS session management information.",
    ),
    (
        "ESM Information Response",
        "The UE returns the requested ESM information.",
    ),
    (
        "Activate Default EPS Bearer Context Request",
        "The network requests activation of the default data bearer.",
    ),
    (
        "Activate Default EPS Bearer Context Accept",
        "The UE accepts activation of the default data bearer.",
    ),
    (
        "RRC Connection Request",
        "The UE asks the eNB for an RRC connection.",
    ),
    (
        "RRC Connection Setup",
        "The eNB sends the RRC connection setup parameters.",
    ),
    (
        "RRC Connection Setup Complete",
        "The UE confirms the RRC connection is established.",
    ),
    (
        "Measurement Report",
        "The UE reports serving and neighbour cell signal quality.",
    ),
    (
        "Handover Command",
        "The source eNB orders the UE to move to the target cell.",
    ),
    (
        "Handover Complete",
        "The UE reports that the handover has finished.",
    ),
    (
        "Paging",
        "The MME looks for an idle UE: first over S1-AP to the eNB, then over RRC to the UE.",
    ),
];

const PROTOCOL_EXPLANATIONS: &[(&str, &str)] = &[
    ("NAS", "Non-Access Stratum - upper layer signalling between UE and MME"),
    ("RRC", "Radio Resource Control - radio resource control between UE and eNB"),
    ("PDCP", "Packet Data Convergence Protocol - compression and ciphering of data packets"),
    ("RLC", "Radio Link Control - reliable transfer over the radio link"),
    ("MAC", "Medium Access Control - sharing of radio resources and access control"),
    ("PHY", "Physical Layer - physical layer signalling and transmission"),
];

/// 先按消息类型精确查表，再按协议名查表，最后给出通用描述。
pub fn explain(msg: &Message) -> String {
    if let Some((_, text)) = MESSAGE_EXPLANATIONS
        .iter()
        .find(|(t, _)| *t == msg.message_type)
    {
        return (*text).to_string();
    }
    if let Some((_, text)) = PROTOCOL_EXPLANATIONS
        .iter()
        .find(|(p, _)| *p == msg.protocol)
    {
        return (*text).to_string();
    }
    let protocol = if msg.protocol.is_empty() {
        "Unknown"
    } else {
        msg.protocol.as_str()
    };
    let message_type = if msg.message_type.is_empty() {
        "Unknown"
    } else {
        msg.message_type.as_str()
    };
    format!(
        "{protocol} message '{message_type}' ({} direction)",
        msg.direction()
    )
}

/// 箭头颜色：失败类消息优先标红，其余按上下行区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowColor {
    Failure,
    Uplink,
    Downlink,
}

impl ArrowColor {
    pub fn of(c: &Classification, direction: Direction) -> Self {
        if c.is_failure {
            ArrowColor::Failure
        } else if direction == Direction::Uplink {
            ArrowColor::Uplink
        } else {
            ArrowColor::Downlink
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            ArrowColor::Failure => "#dc3545",
            ArrowColor::Uplink => "#28a745",
            ArrowColor::Downlink => "#007bff",
        }
    }
}

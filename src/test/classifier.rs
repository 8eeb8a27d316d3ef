use crate::classify::{
    ArrowColor, Entity, Features, Interface, Layer, Link, PATH_RULES, Route, classify, explain,
    first_match,
};
use crate::model::{Direction, Message};

fn msg(protocol: &str, message_type: &str, direction: Direction) -> Message {
    Message::new(1, protocol, message_type).with_direction(direction)
}

#[test]
fn s1ap_paging_downlink_goes_mme_to_enb() {
    let c = classify(&msg("S1AP", "Paging", Direction::Downlink));
    assert_eq!(c.route, Some(Route::new(Entity::Mme, Entity::Enb)));
    assert_eq!(c.link, Link::EnbMme);
    assert_eq!(c.rule, "s1ap-paging");
    assert!(c.is_paging);
    assert!(c.is_s1ap);
    assert!(!c.is_broadcast());
}

#[test]
fn s1ap_paging_uplink_goes_enb_to_mme() {
    let c = classify(&msg("S1AP", "Paging", Direction::Uplink));
    assert_eq!(c.route, Some(Route::new(Entity::Enb, Entity::Mme)));
}

#[test]
fn rrc_paging_downlink_is_an_enb_broadcast() {
    let c = classify(&msg("RRC", "Paging", Direction::Downlink));
    assert_eq!(c.route, Some(Route::broadcast(Entity::Enb, Entity::Ue)));
    assert!(c.is_broadcast());
    assert_eq!(c.rule, "rrc-paging");
    assert_eq!(c.link.interface(), Some(Interface::Air));
}

#[test]
fn paging_flag_triggers_paging_rules() {
    let m = Message::new(1, "RRC", "pcch-Message")
        .with_direction(Direction::parse("PCCH"))
        .with_paging_flag();
    let c = classify(&m);
    assert!(c.is_paging);
    assert_eq!(c.rule, "rrc-paging");
    assert!(c.is_broadcast());
}

#[test]
fn nas_uplink_goes_ue_to_mme() {
    let c = classify(&msg("NAS", "Attach Request", Direction::Uplink));
    assert_eq!(c.route, Some(Route::new(Entity::Ue, Entity::Mme)));
    assert_eq!(c.link, Link::UeMme);
    assert_eq!(c.link.interface(), None);
    assert!(c.is_nas);
}

#[test]
fn nas_downlink_goes_mme_to_ue() {
    let c = classify(&msg("NAS", "Attach Accept", Direction::Downlink));
    assert_eq!(c.route, Some(Route::new(Entity::Mme, Entity::Ue)));
}

#[test]
fn nas_service_request_always_goes_ue_to_mme() {
    let c = classify(&msg("NAS", "Service Request", Direction::Downlink));
    assert_eq!(c.rule, "nas-service-request");
    assert_eq!(c.route, Some(Route::new(Entity::Ue, Entity::Mme)));
}

#[test]
fn nas_keyword_in_message_type_wins_over_rrc_protocol() {
    let c = classify(&msg("RRC", "Authentication Request", Direction::Downlink));
    assert_eq!(c.rule, "nas");
    assert_eq!(c.route, Some(Route::new(Entity::Mme, Entity::Ue)));
}

#[test]
fn s1ap_without_paging_follows_direction() {
    let down = classify(&msg("S1AP", "Initial Context Setup Request", Direction::Downlink));
    assert_eq!(down.rule, "s1ap");
    assert_eq!(down.route, Some(Route::new(Entity::Mme, Entity::Enb)));
    assert_eq!(down.link.interface(), Some(Interface::S1));

    let up = classify(&msg("S1AP", "UE Context Release Complete", Direction::Uplink));
    assert_eq!(up.route, Some(Route::new(Entity::Enb, Entity::Mme)));
}

#[test]
fn paging_with_other_protocol_falls_through() {
    // 既不是 S1-AP 也不是 RRC 的 paging 落入后面的规则
    let c = classify(&msg("NAS", "Paging", Direction::Downlink));
    assert!(c.is_paging);
    assert_eq!(c.rule, "nas");
    assert_eq!(c.route, Some(Route::new(Entity::Mme, Entity::Ue)));
}

#[test]
fn anything_else_is_rrc_between_ue_and_enb() {
    let up = classify(&msg("RRC", "RRC Connection Request", Direction::Uplink));
    assert_eq!(up.rule, "rrc");
    assert_eq!(up.route, Some(Route::new(Entity::Ue, Entity::Enb)));

    let down = classify(&msg("MAC", "Random Access Response", Direction::Downlink));
    assert_eq!(down.route, Some(Route::new(Entity::Enb, Entity::Ue)));

    let last = PATH_RULES.last().expect("rule table is not empty");
    let f = Features::of(&msg("", "", Direction::Unknown));
    assert_eq!(first_match(&f).name, last.name);
}

#[test]
fn unknown_direction_has_no_route() {
    for m in [
        msg("NAS", "Attach Request", Direction::Unknown),
        msg("RRC", "Paging", Direction::Unknown),
        msg("S1AP", "Paging", Direction::Unknown),
    ] {
        let c = classify(&m);
        assert!(c.is_unknown_direction, "{}", m.message_type);
        assert_eq!(c.route, None);
    }
    // 实体对仍然给出
    assert_eq!(
        classify(&msg("S1AP", "Paging", Direction::Unknown)).link,
        Link::EnbMme
    );
}

#[test]
fn unrecognised_channel_tag_takes_the_fallback_branch() {
    let m = msg("RRC", "RRC Connection Request", Direction::parse("ccch"));
    let c = classify(&m);
    assert!(!c.is_unknown_direction);
    assert_eq!(c.route, Some(Route::new(Entity::Enb, Entity::Ue)));
    assert_eq!(ArrowColor::of(&c, m.direction()), ArrowColor::Downlink);

    let nas = classify(&msg("NAS", "Attach Request", Direction::Other));
    assert_eq!(nas.route, Some(Route::new(Entity::Mme, Entity::Ue)));
}

#[test]
fn classification_is_deterministic() {
    let m = msg("S1AP", "Handover Request", Direction::Downlink).with_content("ciphering");
    assert_eq!(classify(&m), classify(&m));
}

#[test]
fn layers_come_from_tags_and_content_keywords() {
    let nas = classify(
        &msg("NAS", "Attach Request", Direction::Uplink).with_content("EMM attach with security"),
    );
    assert_eq!(nas.layers, vec![Layer::Nas]);

    let mixed = classify(
        &msg("RRC", "DL Information Transfer", Direction::Downlink)
            .with_content("PDCP ciphering on this channel"),
    );
    assert_eq!(mixed.layers, vec![Layer::Rrc, Layer::Pdcp, Layer::Phy]);
}

#[test]
fn no_layer_match_highlights_rrc() {
    let c = classify(&msg("S1AP", "Handover Request", Direction::Downlink));
    assert_eq!(c.layers, vec![Layer::Rrc]);
    assert_eq!(Layer::STACK.len(), 9);
    assert_eq!(Layer::S1ap.name(), "S1AP");
}

#[test]
fn arrow_color_prefers_failure_then_direction() {
    let reject = msg("NAS", "Attach Reject", Direction::Downlink);
    let c = classify(&reject);
    assert!(c.is_failure);
    assert_eq!(ArrowColor::of(&c, reject.direction()).hex(), "#dc3545");

    let up = msg("RRC", "RRC Connection Request", Direction::Uplink);
    assert_eq!(
        ArrowColor::of(&classify(&up), up.direction()),
        ArrowColor::Uplink
    );
    assert_eq!(ArrowColor::Uplink.hex(), "#28a745");

    let down = msg("RRC", "RRC Connection Setup", Direction::Downlink);
    assert_eq!(
        ArrowColor::of(&classify(&down), down.direction()).hex(),
        "#007bff"
    );
}

#[test]
fn explanation_falls_back_from_type_to_protocol_to_generic() {
    let known = msg("NAS", "Attach Request", Direction::Uplink);
    assert!(explain(&known).starts_with("The UE sends this to register"));

    let by_protocol = msg("PDCP", "Status Report", Direction::Uplink);
    assert!(explain(&by_protocol).starts_with("Packet Data Convergence Protocol"));

    let generic = msg("S1AP", "eNB Configuration Update", Direction::Uplink);
    assert_eq!(
        explain(&generic),
        "S1AP message 'eNB Configuration Update' (uplink direction)"
    );
}

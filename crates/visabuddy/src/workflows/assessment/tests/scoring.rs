use serde_json::json;

use super::common::*;
use crate::workflows::assessment::risk::{compute_drivers, score_risk, RiskDriver, RiskLevel};

#[test]
fn underfunded_first_time_tourist_scores_high_risk() {
    let context = build(&high_risk_tourist_payload());

    let financial = &context.expert_fields.financial;
    assert_eq!(financial.required_funds_usd, 5500.0);
    let ratio = financial.sufficiency_ratio.expect("ratio defined");
    assert!((ratio - 0.1818).abs() < 0.001);

    for expected in [
        RiskDriver::LowFunds,
        RiskDriver::WeakTies,
        RiskDriver::NoProperty,
        RiskDriver::LimitedTravelHistory,
    ] {
        assert!(
            context.risk.risk_drivers.contains(&expected),
            "missing driver {expected:?} in {:?}",
            context.risk.risk_drivers
        );
    }

    assert_eq!(context.risk.level, RiskLevel::High);
    assert_eq!(context.risk.score, 100);
    assert_eq!(context.risk.approval_probability_percent, 5);
}

#[test]
fn strong_profile_scores_low_risk_with_no_drivers() {
    let context = build(&strong_profile_payload());

    assert_eq!(context.risk.risk_drivers, vec![RiskDriver::None]);
    assert_eq!(context.risk.level, RiskLevel::Low);
    assert!(context.risk.score <= 35);
    assert!(context.risk.risk_factors.is_empty());
    assert!(!context.risk.positive_factors.is_empty());
}

#[test]
fn strong_profile_override_caps_the_score_at_medium() {
    // Ties are strong and the ratio sits at 1.5, but a minor, unemployed,
    // sponsor-financed first-time traveler racks up additive penalties well
    // past the high-risk breakpoint.
    let payload = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "personal": { "age": 17, "hasChildren": true },
        "finances": {
            "monthlyIncomeUsd": 200.0,
            "bankBalanceUsd": 7750.0,
            "sponsorType": "family"
        },
        "employment": { "status": "unemployed" },
        "trip": { "duration": "1_3_months" },
        "travelHistory": { "refusalCount": 0, "hasOverstayed": false, "hasTraveledAbroad": false },
        "ties": { "ownsProperty": true, "familyInHomeCountry": true }
    });

    let context = build(&payload);

    let ratio = context
        .expert_fields
        .financial
        .sufficiency_ratio
        .expect("ratio defined");
    assert!((ratio - 1.5).abs() < 0.001);
    assert_eq!(context.expert_fields.ties.label.label(), "strong");

    assert_eq!(context.risk.score, 65);
    assert_eq!(context.risk.level, RiskLevel::Medium);
}

#[test]
fn unknown_funds_add_only_the_flat_bump() {
    let with_known_funds = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "finances": { "bankBalanceUsd": 6325.0 },
        "trip": { "duration": "1_3_months" },
        "ties": { "ownsProperty": false, "familyInHomeCountry": false }
    });
    let with_unknown_funds = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "trip": { "duration": "1_3_months" },
        "ties": { "ownsProperty": false, "familyInHomeCountry": false }
    });

    let known = build(&with_known_funds);
    let unknown = build(&with_unknown_funds);

    // 6325/5500 sits in the neutral [1.0, 1.3) band, so the only difference
    // between the two scores is the flat unknown-funds adjustment.
    let known_ratio = known
        .expert_fields
        .financial
        .sufficiency_ratio
        .expect("ratio defined");
    assert!(known_ratio >= 1.0 && known_ratio < 1.3);
    assert_eq!(unknown.expert_fields.financial.sufficiency_ratio, None);
    assert_eq!(unknown.risk.score, known.risk.score + 5);
}

#[test]
fn refusal_penalty_is_flat_regardless_of_count() {
    // Funds and ties keep the total comfortably below the clamp so the score
    // comparison is meaningful.
    let payload_for = |refusals: u32| {
        json!({
            "version": "2.0",
            "visaType": "tourist",
            "targetCountry": "US",
            "finances": { "bankBalanceUsd": 20000.0 },
            "trip": { "duration": "1_3_months" },
            "travelHistory": { "refusalCount": refusals, "hasTraveledAbroad": false },
            "ties": { "ownsProperty": true, "familyInHomeCountry": true }
        })
    };

    let one = build(&payload_for(1));
    let three = build(&payload_for(3));

    assert!(one.risk.score < 100);
    assert_eq!(one.risk.score, three.risk.score);
    assert!(one.risk.risk_drivers.contains(&RiskDriver::PreviousVisaRefusals));
    assert!(three.risk.risk_drivers.contains(&RiskDriver::PreviousVisaRefusals));
}

#[test]
fn overstay_outweighs_a_refusal() {
    let base = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "finances": { "bankBalanceUsd": 2000.0 },
        "trip": { "duration": "1_3_months" },
        "travelHistory": { "refusalCount": 0, "hasOverstayed": true, "hasTraveledAbroad": true },
        "ties": { "ownsProperty": false, "familyInHomeCountry": false }
    });

    let context = build(&base);

    assert!(context.risk.risk_drivers.contains(&RiskDriver::PreviousOverstay));
    assert_eq!(context.risk.level, RiskLevel::High);
}

#[test]
fn level_breakpoints_sit_at_35_and_65() {
    assert_eq!(RiskLevel::for_score(0), RiskLevel::Low);
    assert_eq!(RiskLevel::for_score(35), RiskLevel::Low);
    assert_eq!(RiskLevel::for_score(36), RiskLevel::Medium);
    assert_eq!(RiskLevel::for_score(65), RiskLevel::Medium);
    assert_eq!(RiskLevel::for_score(66), RiskLevel::High);
    assert_eq!(RiskLevel::for_score(100), RiskLevel::High);
}

#[test]
fn score_and_probability_stay_in_bounds() {
    for payload in [
        high_risk_tourist_payload(),
        strong_profile_payload(),
        high_risk_legacy_payload(),
    ] {
        let context = build(&payload);
        assert!(context.risk.score <= 100);
        assert!((5..=95).contains(&context.risk.approval_probability_percent));
    }
}

#[test]
fn sponsor_and_minor_flags_raise_the_score() {
    let neutral = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "personal": { "age": 30 },
        "finances": { "bankBalanceUsd": 6000.0, "sponsorType": "self" },
        "trip": { "duration": "1_3_months" },
        "ties": { "ownsProperty": true, "familyInHomeCountry": true }
    });
    let flagged = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "personal": { "age": 17 },
        "finances": { "bankBalanceUsd": 6000.0, "sponsorType": "employer" },
        "trip": { "duration": "1_3_months" },
        "ties": { "ownsProperty": true, "familyInHomeCountry": true }
    });

    let neutral = build(&neutral);
    let flagged = build(&flagged);

    assert!(flagged.risk.risk_drivers.contains(&RiskDriver::SponsorBasedFinance));
    assert!(flagged.risk.risk_drivers.contains(&RiskDriver::IsMinor));
    assert_eq!(flagged.risk.score, neutral.risk.score + 15);
}

#[test]
fn self_employed_without_proof_fires_only_without_evidence() {
    let summary_without_proof = {
        let payload = json!({
            "version": "2.0",
            "visaType": "tourist",
            "targetCountry": "US",
            "employment": { "status": "self_employed" },
            "trip": { "duration": "1_3_months" },
            "ties": { "ownsProperty": false, "familyInHomeCountry": false }
        });
        build(&payload)
    };
    let summary_with_statement = {
        let payload = json!({
            "version": "2.0",
            "visaType": "tourist",
            "targetCountry": "US",
            "employment": { "status": "self_employed" },
            "trip": { "duration": "1_3_months" },
            "ties": { "ownsProperty": false, "familyInHomeCountry": false },
            "documents": ["bank_statement"]
        });
        build(&payload)
    };

    assert!(summary_without_proof
        .risk
        .risk_drivers
        .contains(&RiskDriver::SelfEmployedWithoutProof));
    assert!(!summary_with_statement
        .risk
        .risk_drivers
        .contains(&RiskDriver::SelfEmployedWithoutProof));
}

#[test]
fn big_funds_against_low_income_is_flagged() {
    let payload = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "finances": { "monthlyIncomeUsd": 100.0, "bankBalanceUsd": 9000.0 },
        "trip": { "duration": "1_3_months" },
        "ties": { "ownsProperty": false, "familyInHomeCountry": false }
    });

    let context = build(&payload);

    // 9250 available against 100/month income is far past the 24x limit.
    assert!(context
        .risk
        .risk_drivers
        .contains(&RiskDriver::BigFundsVsLowIncome));
}

#[test]
fn driver_engine_emits_the_sentinel_when_nothing_fires() {
    let context = build(&strong_profile_payload());
    let drivers = compute_drivers(&context.expert_fields, &context.questionnaire);
    assert_eq!(drivers, vec![RiskDriver::None]);

    let rescored = score_risk(&context.expert_fields, &context.questionnaire, &drivers);
    assert_eq!(rescored, context.risk);
}

use std::io::ErrorKind;
use std::sync::Arc;

use chrono::Local;
use clap::Args;
use visabuddy::config::AppConfig;
use visabuddy::error::AppError;
use visabuddy::workflows::assessment::{
    build_context, AssessmentService, CanonicalApplicantContext, ContextRequest,
};

use crate::cli::PreviewArgs;
use crate::infra::{demo_student_record, demo_tourist_record, load_catalog, InMemoryApplicantStore};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the assessment date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<chrono::NaiveDate>,
    /// Print the full context JSON after the readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = load_catalog(&config.catalog)?;

    let payload = match &args.payload {
        Some(path) => {
            let raw = std::fs::read(path)?;
            let value: serde_json::Value = serde_json::from_slice(&raw)
                .map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?;
            Some(value)
        }
        None => None,
    };

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let context = build_context(
        ContextRequest {
            payload: payload.as_ref(),
            app_language: &args.language,
            country_hint: &args.country,
            today,
        },
        &catalog,
    )
    .map_err(|err| AppError::Assessment(err.into()))?;

    render_context(&context);
    match serde_json::to_string_pretty(&context) {
        Ok(json) => println!("\nContext payload:\n{json}"),
        Err(err) => println!("\nContext payload unavailable: {err}"),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = Arc::new(load_catalog(&config.catalog)?);
    let store = Arc::new(InMemoryApplicantStore::with_demo_data());
    let service = AssessmentService::new(store, catalog);

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("VisaBuddy assessment demo (evaluated {today})");

    for record in [demo_tourist_record(), demo_student_record()] {
        let id = record.application_id;
        println!("\n=== Application {} ===", id.0);
        let context = service.assess_at(&id, today)?;
        render_context(&context);

        if args.json {
            match serde_json::to_string_pretty(&context) {
                Ok(json) => println!("\nContext payload:\n{json}"),
                Err(err) => println!("\nContext payload unavailable: {err}"),
            }
        }
    }

    Ok(())
}

pub(crate) fn render_context(context: &CanonicalApplicantContext) {
    let summary = &context.questionnaire;
    println!(
        "Applicant: {} visa to {} (source: {})",
        summary.visa_type.label(),
        summary.target_country,
        context.provenance.source_format.label()
    );

    let financial = &context.expert_fields.financial;
    println!("\nFinancial sufficiency");
    println!("- required: ${:.0}", financial.required_funds_usd);
    match financial.available_funds_usd {
        Some(available) => println!("- available: ${available:.0}"),
        None => println!("- available: unknown"),
    }
    match (financial.sufficiency_ratio, financial.label) {
        (Some(ratio), Some(label)) => {
            println!("- ratio: {:.2} ({})", ratio, label.label())
        }
        _ => println!("- ratio: undefined (treated as neutral)"),
    }

    let ties = &context.expert_fields.ties;
    println!("\nTies strength: {:.1} ({})", ties.score, ties.label.label());
    for factor in &ties.factors {
        println!("- {factor:?}");
    }

    let travel = &context.expert_fields.travel_history;
    println!(
        "Travel history: {:.1} ({})",
        travel.score,
        travel.label.label()
    );

    let completeness = &context.expert_fields.data_completeness;
    println!("Data completeness: {:.0}%", completeness.score * 100.0);
    if !completeness.missing_critical_fields.is_empty() {
        println!(
            "- missing: {}",
            completeness.missing_critical_fields.join(", ")
        );
    }

    let risk = &context.risk;
    println!(
        "\nRisk: {} ({}) | approval probability {}%",
        risk.score,
        risk.level.label(),
        risk.approval_probability_percent
    );
    println!(
        "Drivers: {}",
        risk.risk_drivers
            .iter()
            .map(|driver| driver.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for factor in &risk.risk_factors {
        println!("- risk: {factor}");
    }
    for factor in &risk.positive_factors {
        println!("- strength: {factor}");
    }

    if !context.provenance.fallback_fields_used.is_empty() {
        println!(
            "\nFallbacks used: {}",
            context.provenance.fallback_fields_used.join(", ")
        );
    }
    if !context.provenance.extraction_warnings.is_empty() {
        println!("Warnings:");
        for warning in &context.provenance.extraction_warnings {
            println!("- {warning}");
        }
    }
}

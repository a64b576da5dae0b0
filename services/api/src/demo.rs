use crate::infra::{build_services, parse_condition, LendingServices};
use chrono::{Datelike, Utc};
use clap::Args;
use vehicle_lending::config::AppConfig;
use vehicle_lending::error::AppError;
use vehicle_lending::workflows::loans::amortization::{monthly_payment, total_repayment};
use vehicle_lending::workflows::loans::{
    EmploymentStatus, LoanApplicationSubmission, SubmissionOutcome,
};
use vehicle_lending::workflows::valuation::ValuationEstimator;
use vehicle_lending::workflows::vehicles::{NewVehicle, Vehicle, VehicleCondition, VehicleId};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Principal to finance
    #[arg(long)]
    pub(crate) amount: f64,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 12.0)]
    pub(crate) rate: f64,
    /// Term in months
    #[arg(long, default_value_t = 48, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) term: u32,
}

#[derive(Args, Debug)]
pub(crate) struct ValueArgs {
    #[arg(long)]
    pub(crate) make: String,
    #[arg(long, default_value = "Unknown")]
    pub(crate) model: String,
    /// Model year
    #[arg(long)]
    pub(crate) year: i32,
    #[arg(long, default_value_t = 0)]
    pub(crate) mileage: u32,
    /// excellent, good, fair or poor
    #[arg(long, default_value = "good", value_parser = parse_condition)]
    pub(crate) condition: VehicleCondition,
    /// Valuation year (defaults to the current year)
    #[arg(long)]
    pub(crate) as_of: Option<i32>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only register the sample vehicles and print their valuations.
    #[arg(long)]
    pub(crate) skip_applications: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs { amount, rate, term } = args;
    let payment = monthly_payment(amount, rate, term);

    println!("Loan quote");
    println!("- Principal: ₦{amount:.2}");
    println!("- Rate: {rate:.2}% APR over {term} months");
    println!("- Monthly payment: ₦{payment:.2}");
    println!("- Total repayment: ₦{:.2}", total_repayment(payment, term));
    Ok(())
}

pub(crate) fn run_value(args: ValueArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let estimator = ValuationEstimator::new(config.valuation);
    let current_year = args.as_of.unwrap_or_else(|| Utc::now().year());

    let vehicle = Vehicle::from_new(
        VehicleId(0),
        NewVehicle {
            vin: String::new(),
            make: args.make,
            model: args.model,
            year: args.year,
            mileage: args.mileage,
            condition: args.condition,
            price: 0.0,
            color: None,
            images: Vec::new(),
        },
        Utc::now(),
    );
    let estimate = estimator.simulate(&vehicle, current_year);

    println!(
        "{} {} {} ({} km, {})",
        vehicle.year,
        vehicle.make,
        vehicle.model,
        vehicle.mileage,
        vehicle.condition.label()
    );
    println!(
        "- Estimated value: ₦{:.0} ({} model, confidence {:.2})",
        estimate.estimated_value,
        estimate.source.label(),
        estimate.confidence_score
    );
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let services = build_services(&config)?;

    println!("Vehicle lending demo");
    println!("\nRegistering sample vehicles");
    let mut registered = Vec::new();
    for vehicle in sample_vehicles() {
        let vehicle = services.vehicles.register(vehicle).await?;
        let latest = services.vehicles.valuations(vehicle.id)?.into_iter().next();
        match latest {
            Some(valuation) => println!(
                "- #{} {} {} {} -> ₦{:.0} ({}, confidence {:.2})",
                vehicle.id,
                vehicle.year,
                vehicle.make,
                vehicle.model,
                valuation.estimated_value,
                valuation.source.label(),
                valuation.confidence_score
            ),
            None => println!(
                "- #{} {} {} {} -> valuation unavailable",
                vehicle.id, vehicle.year, vehicle.make, vehicle.model
            ),
        }
        registered.push(vehicle);
    }

    if args.skip_applications {
        return Ok(());
    }

    println!("\nLoan applications");
    for submission in sample_submissions(&registered) {
        let applicant = submission.applicant_name.clone();
        let outcome = services.loans.submit(submission).await?;
        render_outcome(&applicant, &outcome);
        render_offers(&services, &outcome)?;
    }

    Ok(())
}

fn render_outcome(applicant: &str, outcome: &SubmissionOutcome) {
    let application = &outcome.application;
    println!(
        "- Application {} for {} on vehicle #{}: {} (score {})",
        application.id,
        applicant,
        application.vehicle_id,
        application.status.label(),
        application.eligibility_score
    );
    println!("  {}", outcome.message);
    for reason in &outcome.reasons {
        println!("  - {reason}");
    }
    if let Some(value) = outcome.vehicle_value {
        println!("  Vehicle value used: ₦{value:.0}");
    }
}

fn render_offers(services: &LendingServices, outcome: &SubmissionOutcome) -> Result<(), AppError> {
    if !outcome.eligible {
        return Ok(());
    }

    println!("  Offers (lowest monthly payment first):");
    for offer in services.loans.offers(outcome.application.id)? {
        println!(
            "    - {} months @ {:.1}% -> ₦{:.2}/month, ₦{:.2} total on ₦{:.0}",
            offer.term_months,
            offer.interest_rate,
            offer.monthly_payment,
            offer.total_repayment,
            offer.approved_amount
        );
    }
    Ok(())
}

fn sample_vehicles() -> Vec<NewVehicle> {
    vec![
        NewVehicle {
            vin: "1HGBH41JXMN109186".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2020,
            mileage: 35_000,
            condition: VehicleCondition::Good,
            price: 30_000.0,
            color: Some("Silver".to_string()),
            images: Vec::new(),
        },
        NewVehicle {
            vin: "WBADT43452G123456".to_string(),
            make: "BMW".to_string(),
            model: "X5".to_string(),
            year: 2019,
            mileage: 45_000,
            condition: VehicleCondition::Excellent,
            price: 55_000.0,
            color: Some("Black".to_string()),
            images: Vec::new(),
        },
        NewVehicle {
            vin: "JN1AZ4EH8DM123456".to_string(),
            make: "Honda".to_string(),
            model: "Accord".to_string(),
            year: 2021,
            mileage: 25_000,
            condition: VehicleCondition::Excellent,
            price: 240_000.0,
            color: Some("White".to_string()),
            images: Vec::new(),
        },
    ]
}

fn sample_submissions(vehicles: &[Vehicle]) -> Vec<LoanApplicationSubmission> {
    let applicants = [
        (
            "John Doe",
            "john.doe@example.com",
            "+2348031234567",
            5_000_000.0,
            EmploymentStatus::Employed,
            500_000.0,
        ),
        (
            "Jane Smith",
            "jane.smith@example.com",
            "+2348059876543",
            8_000_000.0,
            EmploymentStatus::SelfEmployed,
            800_000.0,
        ),
        (
            "Amina Yusuf",
            "amina.yusuf@example.com",
            "+2348021112222",
            3_000_000.0,
            EmploymentStatus::Employed,
            450_000.0,
        ),
    ];

    vehicles
        .iter()
        .zip(applicants)
        .map(
            |(vehicle, (name, email, phone, requested_amount, employment_status, monthly_income))| {
                LoanApplicationSubmission {
                    vehicle_id: vehicle.id,
                    applicant_name: name.to_string(),
                    applicant_email: email.to_string(),
                    applicant_phone: phone.to_string(),
                    requested_amount,
                    employment_status,
                    monthly_income,
                }
            },
        )
        .collect()
}

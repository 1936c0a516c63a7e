use stepwise_types::{ChoiceOption, FieldDescriptor, StepDefinition, SurveyDefinition};

use crate::contact_step;

/// Battery storage enquiry: three dropdowns, a solar radio group, contact details.
pub fn battery_survey() -> SurveyDefinition {
    SurveyDefinition::new(
        "Battery Storage Survey",
        vec![
            StepDefinition::dropdown(
                1,
                "Which battery brand are you interested in?",
                FieldDescriptor::choice(
                    "batteryBrand",
                    "Battery brand",
                    vec![
                        "GivEnergy".into(),
                        "Tesla Powerwall".into(),
                        "SolarEdge".into(),
                        "Fox ESS".into(),
                        ChoiceOption::new("Not sure", "Not sure - advise me"),
                    ],
                ),
            ),
            StepDefinition::dropdown(
                2,
                "What size battery are you looking for?",
                FieldDescriptor::choice(
                    "batterySize",
                    "Battery size",
                    vec![
                        ChoiceOption::new("5kWh", "Up to 5kWh"),
                        ChoiceOption::new("10kWh", "5 - 10kWh"),
                        ChoiceOption::new("15kWh", "10 - 15kWh"),
                        ChoiceOption::new("15kWh+", "Over 15kWh"),
                        ChoiceOption::new("Not sure", "Not sure - advise me"),
                    ],
                ),
            ),
            StepDefinition::dropdown(
                3,
                "Which type of battery system?",
                FieldDescriptor::choice(
                    "batteryType",
                    "Battery type",
                    vec![
                        ChoiceOption::new("AC", "AC coupled"),
                        ChoiceOption::new("DC", "DC coupled"),
                        "Hybrid".into(),
                        ChoiceOption::new("Not sure", "Not sure - advise me"),
                    ],
                ),
            ),
            StepDefinition::radio(
                4,
                "Have you got solar panels?",
                FieldDescriptor::choice("hasSolar", "Solar panels", vec!["Yes".into(), "No".into()]),
            ),
            contact_step(5),
        ],
    )
    .expect("battery survey is well-formed")
    .with_prelude("Tell us about the battery storage you have in mind.")
    .with_epilogue(
        "Thank you! Your information has been submitted. One of our team will be in touch shortly.",
    )
}

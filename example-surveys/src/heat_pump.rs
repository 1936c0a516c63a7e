use stepwise_types::{ChoiceOption, FieldDescriptor, StepDefinition, SurveyDefinition};

use crate::contact_step;

/// Heat pump enquiry: three property dropdowns, then contact details.
pub fn heat_pump_survey() -> SurveyDefinition {
    SurveyDefinition::new(
        "Heat Pump Survey",
        vec![
            StepDefinition::dropdown(
                1,
                "How do you currently heat your home?",
                FieldDescriptor::choice(
                    "fuelType",
                    "Fuel type",
                    vec![
                        "Gas".into(),
                        "Oil".into(),
                        "LPG".into(),
                        "Electric".into(),
                        ChoiceOption::new("Solid fuel", "Solid fuel (coal/wood)"),
                        "Other".into(),
                    ],
                ),
            ),
            StepDefinition::dropdown(
                2,
                "How many bedrooms does your property have?",
                FieldDescriptor::choice(
                    "bedrooms",
                    "Bedrooms",
                    vec!["1".into(), "2".into(), "3".into(), "4".into(), ChoiceOption::new("5+", "5 or more")],
                ),
            ),
            StepDefinition::dropdown(
                3,
                "What type of property is it?",
                FieldDescriptor::choice(
                    "propertyType",
                    "Property type",
                    vec![
                        "Detached".into(),
                        "Semi-detached".into(),
                        "Terraced".into(),
                        "Bungalow".into(),
                        ChoiceOption::new("Flat", "Flat/Apartment"),
                    ],
                ),
            ),
            contact_step(4),
        ],
    )
    .expect("heat pump survey is well-formed")
    .with_prelude("Find out whether a heat pump suits your home.")
    .with_epilogue(
        "Thank you! Your information has been submitted. One of our team will be in touch shortly.",
    )
}

use stepwise_types::{FieldDescriptor, StepDefinition};

/// The closing step both surveys share.
pub fn contact_step(number: usize) -> StepDefinition {
    StepDefinition::freeform(
        number,
        "Your contact details",
        vec![
            FieldDescriptor::text("name", "Full name"),
            FieldDescriptor::telephone("telephone", "Telephone number"),
            FieldDescriptor::email("email", "Email address"),
            FieldDescriptor::text("address", "Address"),
            FieldDescriptor::postcode("postcode", "Post code"),
        ],
    )
}

//! Integration tests for stepwise

use std::{sync::Arc, time::Duration};

use stepwise::{
    Advance, ChoiceOption, FieldDescriptor, NavigationError, StepDefinition, SubmissionStatus,
    SubmitError, SurveyController, SurveyDefinition, TestSink, ValidationError, Wizard,
    WizardConfig, WizardEvent, validate,
};

fn options(values: &[&str]) -> Vec<ChoiceOption> {
    values.iter().map(|v| ChoiceOption::plain(*v)).collect()
}

/// Five steps: three dropdowns, a radio group, then contact details.
fn battery_survey() -> Arc<SurveyDefinition> {
    Arc::new(
        SurveyDefinition::new(
            "Battery Storage",
            vec![
                StepDefinition::dropdown(
                    1,
                    "Which battery brand are you interested in?",
                    FieldDescriptor::choice("batteryBrand", "Brand", options(&["GivEnergy", "Tesla"])),
                ),
                StepDefinition::dropdown(
                    2,
                    "What size battery?",
                    FieldDescriptor::choice("batterySize", "Size", options(&["5kWh", "9.5kWh"])),
                ),
                StepDefinition::dropdown(
                    3,
                    "What type of battery?",
                    FieldDescriptor::choice("batteryType", "Type", options(&["AC", "DC"])),
                ),
                StepDefinition::radio(
                    4,
                    "Have you got solar panels?",
                    FieldDescriptor::choice("hasSolar", "Solar", options(&["Yes", "No"])),
                ),
                StepDefinition::freeform(
                    5,
                    "Your details",
                    vec![
                        FieldDescriptor::text("name", "Full name"),
                        FieldDescriptor::telephone("telephone", "Telephone"),
                        FieldDescriptor::email("email", "Email"),
                        FieldDescriptor::text("address", "Address"),
                        FieldDescriptor::postcode("postcode", "Postcode"),
                    ],
                ),
            ],
        )
        .unwrap(),
    )
}

fn through_step_four(wizard: &mut Wizard) {
    for (field, option) in [
        ("batteryBrand", "GivEnergy"),
        ("batterySize", "9.5kWh"),
        ("batteryType", "AC"),
        ("hasSolar", "Yes"),
    ] {
        wizard.select(field, option).unwrap();
        wizard.advance().unwrap();
    }
}

fn fill_contact(wizard: &mut Wizard) {
    wizard.set_input("name", "Test User").unwrap();
    wizard.set_input("telephone", "07123456789").unwrap();
    wizard.set_input("email", "test@example.com").unwrap();
    wizard.set_input("address", "123 Test Street").unwrap();
    wizard.set_input("postcode", "l30 1rd").unwrap();
}

#[test]
fn test_position_stays_in_bounds() {
    let mut wizard = Wizard::new(battery_survey());
    assert_eq!(wizard.retreat(), None);

    through_step_four(&mut wizard);
    assert_eq!(wizard.current_step(), 5);

    fill_contact(&mut wizard);
    assert_eq!(wizard.advance().unwrap(), Advance::AtLastStep);
    assert_eq!(wizard.current_step(), 5);
    assert_eq!(wizard.progress().percent(), 100.0);
}

#[test]
fn test_controls_follow_position() {
    let mut wizard = Wizard::new(battery_survey());
    let first = wizard.controls();
    assert!(!first.back && first.next && !first.submit);

    through_step_four(&mut wizard);
    let last = wizard.controls();
    assert!(last.back && !last.next && last.submit && last.submit_enabled);
    assert_eq!(last.submit_label, "Submit");
}

#[test]
fn test_validation_does_not_mutate() {
    let mut wizard = Wizard::new(battery_survey());
    wizard.select("batteryBrand", "Tesla").unwrap();
    let answers = wizard.answers().clone();

    assert_eq!(wizard.validate_step(1), Ok(()));
    assert_eq!(wizard.validate_step(1), Ok(()));
    assert_eq!(wizard.answers(), &answers);
    assert_eq!(wizard.current_step(), 1);
}

#[test]
fn test_unselected_dropdown_blocks() {
    let mut wizard = Wizard::new(battery_survey());
    let err = wizard.advance().unwrap_err();

    let NavigationError::Validation(validation) = err else {
        panic!("expected a validation failure");
    };
    assert_eq!(validation.message_for("batteryBrand"), Some(validate::SELECT_MESSAGE));
    assert_eq!(wizard.current_step(), 1);
    assert!(wizard.answers().is_empty());
}

#[test]
fn test_lowercase_postcode_is_accepted() {
    let mut wizard = Wizard::new(battery_survey());
    through_step_four(&mut wizard);
    fill_contact(&mut wizard);
    wizard.set_input("postcode", "sw1a 1aa").unwrap();

    wizard.advance().unwrap();
    assert_eq!(wizard.answers().get("postcode"), Some("SW1A 1AA"));
}

#[test]
fn test_bad_postcode_blocks_submission() {
    let mut wizard = Wizard::new(battery_survey());
    through_step_four(&mut wizard);
    fill_contact(&mut wizard);
    wizard.set_input("postcode", "12345").unwrap();

    let err = wizard.begin_submit().unwrap_err();
    let SubmitError::Validation(ValidationError::Fields(violations)) = err else {
        panic!("expected inline violations");
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].message, validate::POSTCODE_MESSAGE);
    assert_eq!(wizard.status(), SubmissionStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_radio_auto_advances_after_delay() {
    let mut controller = SurveyController::new(battery_survey(), TestSink::new());
    for (field, option) in [
        ("batteryBrand", "GivEnergy"),
        ("batterySize", "5kWh"),
        ("batteryType", "DC"),
    ] {
        controller.dispatch(WizardEvent::select(field, option)).await.unwrap();
        controller.dispatch(WizardEvent::Next).await.unwrap();
    }
    assert_eq!(controller.wizard().current_step(), 4);

    controller
        .dispatch(WizardEvent::select("hasSolar", "No"))
        .await
        .unwrap();

    let early =
        tokio::time::timeout(Duration::from_millis(299), controller.next_auto_advance()).await;
    assert!(early.is_err());

    let ticket = controller.next_auto_advance().await;
    controller.auto_advance(ticket).unwrap().unwrap();
    assert_eq!(controller.wizard().current_step(), 5);
    assert_eq!(controller.wizard().answers().get("hasSolar"), Some("No"));
}

#[tokio::test(start_paused = true)]
async fn test_manual_next_supersedes_auto_advance() {
    let mut controller = SurveyController::new(battery_survey(), TestSink::new());
    for (field, option) in [
        ("batteryBrand", "GivEnergy"),
        ("batterySize", "5kWh"),
        ("batteryType", "DC"),
    ] {
        controller.dispatch(WizardEvent::select(field, option)).await.unwrap();
        controller.dispatch(WizardEvent::Next).await.unwrap();
    }
    controller
        .dispatch(WizardEvent::select("hasSolar", "Yes"))
        .await
        .unwrap();
    controller.dispatch(WizardEvent::Next).await.unwrap();
    assert_eq!(controller.wizard().current_step(), 5);

    let fired =
        tokio::time::timeout(Duration::from_secs(1), controller.next_auto_advance()).await;
    assert!(fired.is_err());
    assert_eq!(controller.wizard().current_step(), 5);
}

#[tokio::test]
async fn test_submit_delivers_flat_record() {
    let sink = TestSink::new();
    let mut wizard = Wizard::new(battery_survey());
    through_step_four(&mut wizard);
    fill_contact(&mut wizard);

    wizard.submit(&sink).await.unwrap();

    assert!(wizard.is_locked());
    let records = sink.delivered();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.len(), 10);
    assert_eq!(record.get("batteryBrand"), Some("GivEnergy"));
    assert_eq!(record.get("hasSolar"), Some("Yes"));
    assert_eq!(record.get("postcode"), Some("L30 1RD"));
    assert!(!record.timestamp().is_empty());
}

#[tokio::test]
async fn test_failed_submission_can_be_retried() {
    let config = WizardConfig::default().with_fallback_contact("help@example.com");
    let mut wizard = Wizard::with_config(battery_survey(), config);
    through_step_four(&mut wizard);
    fill_contact(&mut wizard);
    let answers_before_submit = {
        let mut probe = wizard.clone();
        probe.advance().unwrap();
        probe.answers().clone()
    };

    let err = wizard
        .submit(&TestSink::failing("connection reset"))
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Transport { .. }));
    assert_eq!(wizard.status(), SubmissionStatus::Failed);
    assert_eq!(wizard.answers(), &answers_before_submit);
    assert!(wizard.notice().unwrap().ends_with("help@example.com"));

    let sink = TestSink::new();
    wizard.submit(&sink).await.unwrap();
    assert_eq!(wizard.status(), SubmissionStatus::Succeeded);
    assert_eq!(sink.deliveries(), 1);
}

#[tokio::test]
async fn test_locked_after_success() {
    let sink = TestSink::new();
    let mut wizard = Wizard::new(battery_survey());
    through_step_four(&mut wizard);
    fill_contact(&mut wizard);
    wizard.submit(&sink).await.unwrap();

    assert!(matches!(wizard.submit(&sink).await, Err(SubmitError::Locked)));
    assert_eq!(sink.deliveries(), 1);
}

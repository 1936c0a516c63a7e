//! Walk both shipped surveys end to end.

use std::{sync::Arc, time::Duration};

use example_surveys::{battery_survey, heat_pump_survey};
use stepwise::{
    InputKind, SubmissionStatus, SurveyController, TestSink, Wizard, WizardEvent, validate,
};

fn fill_contact(wizard: &mut Wizard) {
    wizard.set_input("name", "Test User").unwrap();
    wizard.set_input("telephone", "07123456789").unwrap();
    wizard.set_input("email", "test@example.com").unwrap();
    wizard.set_input("address", "123 Test Street").unwrap();
    wizard.set_input("postcode", "sw1a 1aa").unwrap();
}

#[test]
fn test_battery_survey_shape() {
    let survey = battery_survey();
    let kinds: Vec<InputKind> = survey.steps().iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        [
            InputKind::SingleSelect,
            InputKind::SingleSelect,
            InputKind::SingleSelect,
            InputKind::SingleChoiceRadio,
            InputKind::FreeformFields,
        ]
    );
    assert!(survey.epilogue.is_some());
}

#[test]
fn test_heat_pump_survey_shape() {
    let survey = heat_pump_survey();
    assert_eq!(survey.len(), 4);
    assert!(survey.field("fuelType").is_some());
    assert!(survey.field("hasSolar").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_battery_survey_end_to_end() {
    let sink = TestSink::new();
    let mut controller = SurveyController::new(Arc::new(battery_survey()), sink.clone());

    for (field, option) in [
        ("batteryBrand", "GivEnergy"),
        ("batterySize", "10kWh"),
        ("batteryType", "Hybrid"),
    ] {
        controller.dispatch(WizardEvent::select(field, option)).await.unwrap();
        controller.dispatch(WizardEvent::Next).await.unwrap();
    }

    controller.dispatch(WizardEvent::Next).await.unwrap_err();
    assert_eq!(controller.wizard().notice(), Some(validate::RADIO_MESSAGE));
    controller.dispatch(WizardEvent::DismissNotice).await.unwrap();

    controller
        .dispatch(WizardEvent::select("hasSolar", "Yes"))
        .await
        .unwrap();
    let ticket = tokio::time::timeout(Duration::from_millis(350), controller.next_auto_advance())
        .await
        .unwrap();
    controller.auto_advance(ticket).unwrap().unwrap();
    assert_eq!(controller.wizard().current_step(), 5);

    for (field, value) in [
        ("name", "Test User"),
        ("telephone", "07123456789"),
        ("email", "test@example.com"),
        ("address", "123 Test Street"),
        ("postcode", "l30 1rd"),
    ] {
        controller.dispatch(WizardEvent::input(field, value)).await.unwrap();
    }
    controller.dispatch(WizardEvent::Submit).await.unwrap();

    assert_eq!(controller.wizard().status(), SubmissionStatus::Succeeded);
    let record = &sink.delivered()[0];
    assert_eq!(record.get("batterySize"), Some("10kWh"));
    assert_eq!(record.get("hasSolar"), Some("Yes"));
    assert_eq!(record.get("postcode"), Some("L30 1RD"));
    assert_eq!(record.get("fuelType"), None);
}

#[tokio::test]
async fn test_heat_pump_survey_end_to_end() {
    let sink = TestSink::new();
    let mut wizard = Wizard::new(Arc::new(heat_pump_survey()));

    for (field, option) in [
        ("fuelType", "Oil"),
        ("bedrooms", "3"),
        ("propertyType", "Semi-detached"),
    ] {
        assert_eq!(wizard.select(field, option).unwrap(), None);
        wizard.advance().unwrap();
    }
    fill_contact(&mut wizard);
    wizard.submit(&sink).await.unwrap();

    let record = &sink.delivered()[0];
    assert_eq!(record.get("fuelType"), Some("Oil"));
    assert_eq!(record.get("postcode"), Some("SW1A 1AA"));
    assert_eq!(record.len(), 9);
}

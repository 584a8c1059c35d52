//! End-to-end checkout scenarios driven keystroke by keystroke

use checkout_validation::{
    CheckoutConfig, ErrorKind, FieldName, FixedClock, FormController, FormSnapshot, SubmitError,
    ValidationEngine, YearMonth,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn june_2025() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(YearMonth::new(2025, 6).unwrap()))
}

fn form() -> (FormController, Rc<RefCell<Vec<FormSnapshot>>>) {
    let submitted = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&submitted);
    let form = FormController::with_clock(CheckoutConfig::default(), june_2025(), move |s| {
        sink.borrow_mut().push(s.clone())
    });
    (form, submitted)
}

/// Simulate typing one character at a time into an input that always shows
/// the stored value
fn type_into(form: &mut FormController, field: FieldName, text: &str) -> Vec<String> {
    let mut shown = Vec::new();
    for ch in text.chars() {
        let current = form.value(field).unwrap_or_default();
        form.handle_change(field, &format!("{current}{ch}"));
        shown.push(form.value(field).unwrap_or_default());
    }
    shown
}

fn backspace(form: &mut FormController, field: FieldName) {
    let mut current = form.value(field).unwrap_or_default();
    current.pop();
    form.handle_change(field, &current);
}

#[test]
fn test_typing_card_number_groups_digits() {
    let (mut form, _) = form();
    let shown = type_into(&mut form, FieldName::CardNumber, "4242424242424242");

    assert_eq!(shown[3], "4242");
    assert_eq!(shown[4], "4242 4");
    assert_eq!(shown[8], "4242 4242 4");
    assert_eq!(shown.last().unwrap(), "4242 4242 4242 4242");
    for (typed, display) in shown.iter().enumerate() {
        let digits = display.chars().filter(char::is_ascii_digit).count();
        assert_eq!(digits, typed + 1, "lost digits at '{display}'");
    }
}

#[test]
fn test_extra_digits_and_letters_are_dropped() {
    let (mut form, _) = form();
    type_into(&mut form, FieldName::CardNumber, "4242424242424242");
    type_into(&mut form, FieldName::CardNumber, "9x");

    assert_eq!(
        form.value(FieldName::CardNumber).as_deref(),
        Some("4242 4242 4242 4242")
    );
}

#[test]
fn test_typing_and_erasing_expiry() {
    let (mut form, _) = form();
    let shown = type_into(&mut form, FieldName::CardExpire, "1229");
    assert_eq!(shown, vec!["1", "12 / ", "12 / 2", "12 / 29"]);

    backspace(&mut form, FieldName::CardExpire);
    assert_eq!(form.value(FieldName::CardExpire).as_deref(), Some("12 / 2"));
    backspace(&mut form, FieldName::CardExpire);
    assert_eq!(form.value(FieldName::CardExpire).as_deref(), Some("12 / "));
    backspace(&mut form, FieldName::CardExpire);
    assert_eq!(form.value(FieldName::CardExpire).as_deref(), Some("1"));
    backspace(&mut form, FieldName::CardExpire);
    assert_eq!(form.value(FieldName::CardExpire).as_deref(), Some(""));
}

#[test]
fn test_autofill_and_paste_over_complete_expiry() {
    let (mut form, _) = form();
    type_into(&mut form, FieldName::CardExpire, "1229");

    form.handle_change(FieldName::CardExpire, "12/29");
    assert_eq!(form.value(FieldName::CardExpire).as_deref(), Some("12 / 29"));
    assert_eq!(form.errors_for(FieldName::CardExpire), "");

    form.handle_change(FieldName::CardExpire, "1229");
    assert_eq!(form.value(FieldName::CardExpire).as_deref(), Some("12 / 29"));

    form.handle_change(FieldName::CardExpire, "0131");
    assert_eq!(form.value(FieldName::CardExpire).as_deref(), Some("01 / 31"));
}

#[test]
fn test_deleting_separator_mid_value_keeps_digits() {
    let (mut form, _) = form();
    type_into(&mut form, FieldName::CardExpire, "1229");

    // Cursor placed after the slash, then backspace
    form.handle_change(FieldName::CardExpire, "12  29");
    assert_eq!(form.value(FieldName::CardExpire).as_deref(), Some("12 / 29"));
    assert_eq!(form.errors_for(FieldName::CardExpire), "");
}

#[test]
fn test_errors_update_while_typing() {
    let (mut form, _) = form();

    type_into(&mut form, FieldName::CardNumber, "4242");
    assert_eq!(form.errors_for(FieldName::CardNumber), "Card number is incomplete");

    type_into(&mut form, FieldName::CardNumber, "424242424241");
    assert_eq!(form.errors_for(FieldName::CardNumber), "Card number is invalid");

    backspace(&mut form, FieldName::CardNumber);
    type_into(&mut form, FieldName::CardNumber, "2");
    assert_eq!(form.errors_for(FieldName::CardNumber), "");

    type_into(&mut form, FieldName::CardExpire, "0520");
    assert_eq!(form.errors_for(FieldName::CardExpire), "Card has expired");

    let state = form.validation_state();
    assert_eq!(state.errors_for(FieldName::CardExpire)[0].kind, ErrorKind::Domain);
    assert_eq!(state.revision, form.snapshot().revision());
}

#[test]
fn test_full_checkout_submits_once() {
    let (mut form, submitted) = form();
    assert!(!form.can_submit());

    type_into(&mut form, FieldName::Email, "a@b.com");
    type_into(&mut form, FieldName::CardNumber, "4242424242424242");
    type_into(&mut form, FieldName::CardExpire, "1229");
    assert!(!form.can_submit(), "cvv still missing");
    type_into(&mut form, FieldName::Cvv, "123");

    assert!(form.can_submit());
    for field in FieldName::ALL {
        assert_eq!(form.errors_for(field), "");
    }

    let request = form.submit().expect("valid form submits");
    assert_eq!(request.email, "a@b.com");
    assert_eq!(request.card_number, "4242424242424242");
    assert_eq!(request.card_expire, "12 / 29");
    assert_eq!(request.cvv, "123");

    let submitted = submitted.borrow();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].get(FieldName::CardNumber), Some("4242 4242 4242 4242"));
}

#[test]
fn test_invalid_submit_reports_errors_and_skips_callback() {
    let (mut form, submitted) = form();
    type_into(&mut form, FieldName::Email, "a@b");
    type_into(&mut form, FieldName::CardNumber, "378282246310005");

    match form.submit() {
        Err(SubmitError::Invalid { errors }) => {
            assert_eq!(
                errors.messages(FieldName::Email),
                vec!["Email must be a valid email address"]
            );
            assert_eq!(errors.get_field_errors(FieldName::CardNumber)[0].code, "unsupported_brand");
            assert_eq!(errors.get_field_errors(FieldName::Cvv)[0].kind, ErrorKind::Required);
        }
        other => panic!("expected invalid submit, got {other:?}"),
    }
    assert!(submitted.borrow().is_empty());
}

#[test]
fn test_brand_hints_follow_prefix() {
    let (mut form, _) = form();
    assert!(!form.brand_hints().visa && !form.brand_hints().mastercard);

    type_into(&mut form, FieldName::CardNumber, "4");
    assert!(form.brand_hints().visa);

    form.handle_change(FieldName::CardNumber, "");
    type_into(&mut form, FieldName::CardNumber, "51");
    assert!(form.brand_hints().mastercard);
    assert!(!form.brand_hints().visa);
}

#[test]
fn test_expiry_depends_on_clock() {
    let config = CheckoutConfig::default();
    let late = Arc::new(FixedClock::new(YearMonth::new(2030, 1).unwrap()));
    let engine = ValidationEngine::checkout_with_clock(&config, late);
    let mut form = FormController::with_engine(config, engine, |_| {});

    type_into(&mut form, FieldName::CardExpire, "1229");
    assert_eq!(form.errors_for(FieldName::CardExpire), "Card has expired");
}

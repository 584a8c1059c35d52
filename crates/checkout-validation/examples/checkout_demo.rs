//! Walks a checkout form from empty to submitted, printing what an input
//! layer would render after each step

use checkout_validation::{
    init_logging, mask_card_number, CheckoutConfig, FieldName, FormController, LoggingConfig,
    SubmitError,
};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::development())?;
    let config = CheckoutConfig::from_env()?;

    println!("💳 checkout-validation Demo");
    println!("===========================\n");

    let mut form = FormController::new(config, |snapshot| {
        let number = snapshot.get(FieldName::CardNumber).unwrap_or_default();
        println!("  📨 payment requested for {}", mask_card_number(number));
    });

    println!("Empty form:");
    print_form(&form);

    // Typed one keystroke at a time, the way an input fires change events
    for (field, text) in [
        (FieldName::Email, "shopper@example.com"),
        (FieldName::CardNumber, "4242424242424242"),
        (FieldName::CardExpire, "1299"),
    ] {
        for ch in text.chars() {
            let current = form.value(field).unwrap_or_default();
            form.handle_change(field, &format!("{current}{ch}"));
        }
    }

    println!("\nCVV still missing:");
    print_form(&form);
    match form.submit() {
        Err(SubmitError::Invalid { errors }) => {
            println!("  ❌ submit refused ({} field(s) invalid)", errors.invalid_field_count())
        }
        other => println!("  ⚠️ unexpected: {other:?}"),
    }

    form.handle_change(FieldName::Cvv, "123");
    println!("\nComplete form:");
    print_form(&form);

    let request = form.submit()?;
    println!("  ✅ payload: {request:?}");

    Ok(())
}

fn print_form(form: &FormController) {
    for field in FieldName::ALL {
        let props = form.register(field);
        let status = if props.invalid { "❌" } else { "✅" };
        println!("  {status} {:<16} {:<24} {}", field.label(), props.value, props.error);
    }
    println!("  [{}] enabled: {}", form.submit_text(), form.can_submit());
}

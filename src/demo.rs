//! Demo page: one of every row kind, plus a few generated values.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::error::PageError;
use crate::mock;
use crate::page::{Action, Dispatch, Feedback, Page};
use crate::strings::Text;
use crate::types::Config;

/// Extra symbol registered on the demo page.
const KEY: &str = "K";

pub fn build_page<R: Rng>(config: &Config, rng: &mut R) -> Result<Page, PageError> {
    let mut page = Page::new(Text::DemoTitle.as_str(), config.page_capacity, &config.display)?;

    page.add_menu_option(1, "Option 1 Description", "Option 1 Action")?;
    for i in 1..=4 {
        page.add_field_value(format!("Field{i}"), format!("Value{i}"));
    }
    page.add_column_header(["Column1", "Column2", "Column3", "Column4"]);
    for _ in 0..3 {
        page.add_columns(["Value1", "Value2", "Value3", "Value4"]);
    }

    page.add_break();
    page.add_field_value(Text::DemoRandomIp.as_str(), mock::random_ip(rng, &config.mock));
    page.add_field_value(Text::DemoRandomMac.as_str(), mock::random_mac(rng, &config.mock));
    page.add_field_value(
        Text::DemoRandomPort.as_str(),
        mock::random_port(rng, &config.mock).to_string(),
    );
    page.add_field_value(
        Text::DemoRandomNumber.as_str(),
        mock::random_number(rng, 1, 100).to_string(),
    );
    page.add_field_value(
        Text::DemoRandomFloat.as_str(),
        format!("{:.3}", mock::random_float(rng, 0.0, 1.0)),
    );
    page.add_break();

    for i in 5..=16 {
        page.add_field_value(format!("Field{i}"), format!("Value{i}"));
    }

    page.register_action(Action::symbol(KEY))?;
    Ok(page)
}

/// Run the demo page; picks are echoed back as feedback until quit.
pub fn run_with<Rd, W, G>(
    config: &Config,
    rng: &mut G,
    input: &mut Rd,
    output: &mut W,
) -> Result<(), PageError>
where
    Rd: BufRead,
    W: Write,
    G: Rng,
{
    let mut page = build_page(config, rng)?;
    loop {
        let picked = match page.run_with(input, output) {
            Dispatch::Quit => return Ok(()),
            Dispatch::Choice(n) => n.to_string(),
            Dispatch::Symbol(s) => s,
            other => format!("{other:?}"),
        };
        page.report(Feedback::info(Text::Picked.as_str(), picked));
    }
}

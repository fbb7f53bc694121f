use shared::{Color, MultiplierSequence};
use yew::prelude::*;

/// One legend chip per distinct multiplier on the wheel, lowest first.
pub fn legend_entries(sequence: &MultiplierSequence) -> Vec<(f64, Color)> {
    sequence
        .distinct_sorted()
        .into_iter()
        .filter_map(|multiplier| Color::for_multiplier(multiplier).map(|color| (multiplier, color)))
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct LegendProps {
    pub entries: Vec<(f64, Color)>,
}

#[function_component(Legend)]
pub fn legend(props: &LegendProps) -> Html {
    html! {
        <div class="flex flex-wrap justify-center gap-2 mt-4">
            { for props.entries.iter().map(|(multiplier, color)| html! {
                <div
                    class="px-3 py-1 rounded text-sm font-bold text-gray-900"
                    style={format!("background-color: {}", color.hex())}
                >
                    { format!("{:.2}x", multiplier) }
                </div>
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: String,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<MouseEvent>>,
    #[prop_or("red")]
    pub tone: &'static str,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    html! {
        <div class={classes!(
            "flex", "items-center", "justify-between", "px-4", "py-2", "mb-3", "rounded",
            format!("bg-{}-100", props.tone),
            format!("text-{}-800", props.tone),
        )}>
            <span>{ &props.message }</span>
            if let Some(on_dismiss) = &props.on_dismiss {
                <button class="ml-4 font-bold" onclick={on_dismiss.clone()}>{ "×" }</button>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BetButtonProps {
    pub busy: bool,
    pub disabled: bool,
}

#[function_component(BetButton)]
pub fn bet_button(props: &BetButtonProps) -> Html {
    let button_class = if props.disabled || props.busy {
        "bg-gray-400 cursor-not-allowed"
    } else {
        "bg-blue-500 hover:bg-blue-600"
    };

    html! {
        <button
            type="submit"
            disabled={props.disabled || props.busy}
            class={classes!("w-full", "px-4", "py-2", "text-white", "font-bold", "rounded", button_class)}
        >
            { if props.busy { "Spinning..." } else { "Submit Bet" } }
        </button>
    }
}

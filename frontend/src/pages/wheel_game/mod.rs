mod sound;
mod wheel_canvas;
pub mod wheel_utils;

use std::time::Duration;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::{debug, error, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use shared::constants::{INVALID_CURRENCY_ERROR, INVALID_WAGER_ERROR};
use shared::validation::{truncate_to_display_scale, wager_to_base_units};
use shared::{
    MultiplierTable, RiskLevel, SegmentCount, SpinOutcome, WheelBetRequest, WheelConfig, WheelGame,
};
use strum::IntoEnumIterator;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api;
use crate::error::ApiError;
use crate::models::{Balance, Session};

use self::sound::SoundBoard;
use self::wheel_canvas::CanvasSurface;
use self::wheel_utils::{legend_entries, Alert, BetButton, Legend};

pub enum Msg {
    Frame(f64),
    SetRisk(RiskLevel),
    SetSegments(SegmentCount),
    SetCurrency(String),
    WagerInput(String),
    Submit,
    BetSettled(Result<f64, ApiError>),
    SpinFinished(shared::Result<SpinOutcome>),
    DismissResult,
    DismissAlert(usize),
}

#[derive(Properties, PartialEq)]
pub struct WheelPageProps {
    pub session: Session,
    pub balances: Vec<Balance>,
}

pub struct WheelPage {
    game: WheelGame<CanvasSurface, SmallRng>,
    canvas_ref: NodeRef,
    currency: Option<String>,
    wager: String,
    bet_in_flight: bool,
    alerts: Vec<String>,
    last_frame: Option<f64>,
    _frame: Option<AnimationFrame>,
}

impl WheelPage {
    fn selected_balance<'a>(&self, ctx: &'a Context<Self>) -> Option<&'a Balance> {
        let currency = self.currency.as_deref()?;
        ctx.props()
            .balances
            .iter()
            .find(|balance| balance.currency_key == currency)
    }

    fn ensure_currency(&mut self, ctx: &Context<Self>) {
        if self.selected_balance(ctx).is_none() {
            self.currency = ctx.props().balances.first().map(|b| b.currency_key.clone());
        }
    }

    fn schedule_frame(&mut self, ctx: &Context<Self>) {
        let link = ctx.link().clone();
        self._frame = Some(request_animation_frame(move |timestamp| {
            link.send_message(Msg::Frame(timestamp))
        }));
    }

    fn busy(&self) -> bool {
        self.bet_in_flight || self.game.is_spinning()
    }

    fn place_bet(&mut self, ctx: &Context<Self>) -> Result<(), &'static str> {
        let balance = self.selected_balance(ctx).ok_or(INVALID_CURRENCY_ERROR)?;
        let wager = wager_to_base_units(&self.wager, balance.display_unit_scale)
            .map_err(|_| INVALID_WAGER_ERROR)?;
        let bet = WheelBetRequest {
            wager,
            currency: balance.currency_key.clone(),
            risk: self.game.risk(),
            segments: self.game.segments(),
        };
        debug!("Placing bet {:?}", bet);

        self.bet_in_flight = true;
        let session = ctx.props().session.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = api::make_wheel_bet(&session, &bet).await;
            link.send_message(Msg::BetSettled(result));
        });
        Ok(())
    }

    fn spin_to(&mut self, ctx: &Context<Self>, multiplier: f64) {
        match self.game.spin_to(multiplier) {
            Ok(handle) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::SpinFinished(handle.await));
                });
            }
            Err(e) => {
                error!("Could not spin to {}: {}", multiplier, e);
                self.bet_in_flight = false;
                self.alerts.push(ApiError::from(e).to_string());
            }
        }
    }

    fn reconfigure(&mut self, risk: RiskLevel, segments: SegmentCount) {
        if let Err(e) = self.game.set_risk_and_segments(risk, segments) {
            warn!("Ignoring wheel change to {} / {}: {}", risk, segments.len(), e);
        }
    }
}

impl Component for WheelPage {
    type Message = Msg;
    type Properties = WheelPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let canvas_ref = NodeRef::default();
        let surface = CanvasSurface::new(canvas_ref.clone(), SoundBoard::load());
        let game = WheelGame::new(
            MultiplierTable::default(),
            RiskLevel::Medium,
            SegmentCount::Thirty,
            surface,
            SmallRng::from_entropy(),
            WheelConfig::default(),
        );

        Self {
            game,
            canvas_ref,
            currency: ctx.props().balances.first().map(|b| b.currency_key.clone()),
            wager: String::new(),
            bet_in_flight: false,
            alerts: Vec::new(),
            last_frame: None,
            _frame: None,
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        self.ensure_currency(ctx);
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.schedule_frame(ctx);
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Frame(timestamp) => {
                let delta = self.last_frame.map_or(0.0, |last| (timestamp - last).max(0.0));
                self.last_frame = Some(timestamp);
                self.game.tick(Duration::from_secs_f64(delta / 1000.0));
                self.game.surface_mut().render();
                self.schedule_frame(ctx);
                false
            }
            Msg::SetRisk(risk) => {
                self.reconfigure(risk, self.game.segments());
                true
            }
            Msg::SetSegments(segments) => {
                self.reconfigure(self.game.risk(), segments);
                true
            }
            Msg::SetCurrency(currency) => {
                self.currency = Some(currency);
                true
            }
            Msg::WagerInput(value) => {
                let scale = self.selected_balance(ctx).map_or(1.0, |b| b.display_unit_scale);
                if let Some(wager) = truncate_to_display_scale(&value, scale) {
                    self.wager = wager;
                }
                // Re-render either way so a rejected keystroke is undone in the input
                true
            }
            Msg::Submit => {
                if self.busy() {
                    return false;
                }
                self.alerts.clear();
                if let Err(message) = self.place_bet(ctx) {
                    self.alerts.push(message.to_string());
                }
                true
            }
            Msg::BetSettled(Ok(multiplier)) => {
                debug!("Bet settled at {}x", multiplier);
                self.spin_to(ctx, multiplier);
                true
            }
            Msg::BetSettled(Err(e)) => {
                error!("Bet failed: {}", e);
                self.bet_in_flight = false;
                self.alerts.push(e.to_string());
                true
            }
            Msg::SpinFinished(result) => {
                self.bet_in_flight = false;
                match result {
                    Ok(outcome) => debug!("Landed on segment {} ({}x)", outcome.index, outcome.multiplier),
                    Err(e) => self.alerts.push(ApiError::from(e).to_string()),
                }
                true
            }
            Msg::DismissResult => {
                if !self.busy() {
                    self.game.dismiss_result();
                }
                false
            }
            Msg::DismissAlert(index) => {
                if index < self.alerts.len() {
                    self.alerts.remove(index);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let busy = self.busy();
        let balances = &ctx.props().balances;
        let selected = self.selected_balance(ctx);

        let on_submit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let on_currency = link.callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::SetCurrency(select.value())
        });
        let on_wager = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::WagerInput(input.value())
        });
        let on_risk = link.batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            select.value().parse::<RiskLevel>().ok().map(Msg::SetRisk)
        });
        let on_segments = link.batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            select
                .value()
                .parse::<usize>()
                .ok()
                .and_then(|count| SegmentCount::try_from(count).ok())
                .map(Msg::SetSegments)
        });

        html! {
            <div class="flex flex-col md:flex-row gap-6 p-4">
                <form onsubmit={on_submit} class="md:w-1/3 space-y-3">
                    { for self.alerts.iter().enumerate().map(|(i, message)| html! {
                        <Alert
                            message={message.clone()}
                            on_dismiss={link.callback(move |_: MouseEvent| Msg::DismissAlert(i))}
                        />
                    }) }

                    <label class="block text-sm font-medium">{ "Currency" }</label>
                    <select class="w-full border rounded px-2 py-1" onchange={on_currency}>
                        { for balances.iter().map(|balance| html! {
                            <option
                                value={balance.currency_key.clone()}
                                selected={self.currency.as_deref() == Some(balance.currency_key.as_str())}
                            >
                                { balance.formatted() }
                            </option>
                        }) }
                    </select>

                    <label class="block text-sm font-medium">
                        { format!("Wager{}", selected.map(|b| format!(" ({})", b.display_unit_name)).unwrap_or_default()) }
                    </label>
                    <input
                        type="text"
                        inputmode="decimal"
                        placeholder="0.00"
                        class="w-full border rounded px-2 py-1"
                        value={self.wager.clone()}
                        oninput={on_wager}
                    />

                    <label class="block text-sm font-medium">{ "Risk" }</label>
                    <select class="w-full border rounded px-2 py-1" onchange={on_risk} disabled={busy}>
                        { for RiskLevel::iter().map(|risk| html! {
                            <option value={risk.to_string()} selected={risk == self.game.risk()}>
                                { risk.label() }
                            </option>
                        }) }
                    </select>

                    <label class="block text-sm font-medium">{ "Segments" }</label>
                    <select class="w-full border rounded px-2 py-1" onchange={on_segments} disabled={busy}>
                        { for SegmentCount::ALL.iter().map(|&segments| html! {
                            <option value={segments.len().to_string()} selected={segments == self.game.segments()}>
                                { segments.len() }
                            </option>
                        }) }
                    </select>

                    <BetButton busy={busy} disabled={balances.is_empty()} />
                </form>

                <div class="flex-1 flex flex-col items-center">
                    <canvas
                        ref={self.canvas_ref.clone()}
                        width="500"
                        height="500"
                        class="max-w-full"
                        onclick={link.callback(|_: MouseEvent| Msg::DismissResult)}
                    />
                    <Legend entries={legend_entries(self.game.multipliers())} />
                </div>
            </div>
        }
    }
}

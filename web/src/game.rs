use crate::storage::LocalStore;
use crate::utils::*;
use clap::Args;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use matchpairs_core as game;
use game::{Card, CardFace, CardId, EffectToken, GameScore, Snapshot, format_clock};
use std::collections::HashMap;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClicked(CardId),
    Fire(EffectToken),
    NewGame,
    VisibilityChanged { hidden: bool },
    CloseVictory,
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    seed: Option<u64>,

    /// Draw the pairs from the whole palette instead of its first entries
    #[arg(long)]
    #[prop_or_default]
    sampled_emojis: bool,
}

impl GameProps {
    fn config(&self) -> game::GameConfig {
        let selection = if self.sampled_emojis {
            game::EmojiSelection::Sampled
        } else {
            game::EmojiSelection::Leading
        };
        game::GameConfig::new(game::Timings::default(), selection)
    }
}

pub(crate) struct GameView {
    session: game::GameSession<LocalStore>,
    timers: HashMap<EffectToken, Timeout>,
    victory_open: bool,
    _visibility_listener: EventListener,
}

impl GameView {
    fn create_visibility_listener(ctx: &Context<Self>) -> EventListener {
        use gloo::utils::document;

        let link = ctx.link().clone();
        EventListener::new(&document(), "visibilitychange", move |_| {
            link.send_message(Msg::VisibilityChanged {
                hidden: document().hidden(),
            })
        })
    }

    /// Arms a browser timer for everything the session scheduled since the last update.
    fn arm_timers(&mut self, ctx: &Context<Self>) {
        let now = utc_now();
        for entry in self.session.drain_scheduled() {
            let delay = entry
                .delay_from(now)
                .num_milliseconds()
                .clamp(0, u32::MAX.into()) as u32;
            let link = ctx.link().clone();
            let token = entry.token;
            log::trace!("arming {:?} in {}ms", entry.effect, delay);
            self.timers.insert(
                token,
                Timeout::new(delay, move || link.send_message(Msg::Fire(token))),
            );
        }
    }

    fn new_game(&mut self) {
        // dropping a Timeout cancels it
        self.timers.clear();
        self.session.start_new_game(js_random_seed());
        self.victory_open = false;
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Self {
            session: game::GameSession::new(props.config(), LocalStore, seed),
            timers: HashMap::new(),
            victory_open: false,
            _visibility_listener: GameView::create_visibility_listener(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let was_finished = self.session.state().is_finished();
        let updated = match msg {
            CardClicked(id) => {
                log::debug!("click {}", id);
                self.session.handle_card_click(id, utc_now())
            }
            Fire(token) => {
                self.timers.remove(&token);
                self.session.fire(token)
            }
            NewGame => {
                self.new_game();
                true
            }
            VisibilityChanged { hidden: true } => self.session.pause(),
            VisibilityChanged { hidden: false } => self.session.resume(utc_now()),
            CloseVictory => std::mem::take(&mut self.victory_open),
        };

        if !was_finished && self.session.state().is_finished() {
            self.victory_open = true;
        }
        self.arm_timers(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.session.snapshot();
        let on_card = ctx.link().callback(Msg::CardClicked);
        let on_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });
        let playable = snapshot.flipped.len() < 2
            && matches!(
                snapshot.state,
                game::EngineState::Waiting | game::EngineState::Playing
            );

        let timings = &self.session.config().timings;
        let style = animation_style(timings);

        html! {
            <div class="matchpairs" {style}>
                <StatsView
                    moves={snapshot.moves}
                    elapsed_secs={snapshot.elapsed_secs}
                    collected={snapshot.collected_pairs()}
                    total={snapshot.total_pairs()}
                    best={snapshot.best_score.clone()}
                    on_new_game={on_new_game.clone()}
                />
                <table class={classes!("board", playable.then_some("playable"))}>
                    {
                        for snapshot.rows().map(|row| html! {
                            <tr>
                                {
                                    for row.iter().map(|&card| html! {
                                        <CardView {card} callback={on_card.clone()}/>
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                <CollectionTray snapshot={snapshot.clone()}/>
                if self.victory_open {
                    if let Some(result) = snapshot.last_result.clone() {
                        <Modal>
                            <VictoryView
                                {result}
                                on_close={ctx.link().callback(|_| Msg::CloseVictory)}
                                on_new_game={on_new_game}
                            />
                        </Modal>
                    }
                }
            </div>
        }
    }
}

fn card_classes(card: &Card) -> Classes {
    use CardFace::*;
    classes!(
        "card",
        match card.face {
            Hidden => "hidden",
            FaceUp => "flipped",
            Matched => "matched",
            Collecting => "collecting",
            Collected => "collected",
        }
    )
}

fn card_label(card: &Card) -> &'static str {
    match card.face {
        CardFace::Hidden | CardFace::Collected => "",
        _ => card.emoji.glyph(),
    }
}

fn animation_style(timings: &game::Timings) -> String {
    format!(
        "--flip-ms: {}ms; --collect-ms: {}ms; --spin-ms: {}ms",
        timings.card_flip_ms, timings.collection_move_ms, timings.collection_spin_ms
    )
}

fn best_label(best: Option<&GameScore>) -> String {
    match best {
        Some(best) => format!("{}m / {}", best.moves, format_clock(best.time)),
        None => "--".to_string(),
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    card: Card,
    callback: Callback<CardId>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps { card, callback } = props.clone();

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{} at {} clicked", card.id, card.position);
        callback.emit(card.id)
    });

    html! {
        <td class={card_classes(&card)} {onclick}>
            <span>{card_label(&card)}</span>
        </td>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct StatsProps {
    moves: u32,
    elapsed_secs: u32,
    collected: usize,
    total: usize,
    best: Option<GameScore>,
    on_new_game: Callback<MouseEvent>,
}

#[function_component(StatsView)]
fn stats_component(props: &StatsProps) -> Html {
    html! {
        <nav class="stats">
            <aside><strong>{props.moves.to_string()}</strong><small>{"Moves"}</small></aside>
            <aside><strong>{format_clock(props.elapsed_secs)}</strong><small>{"Time"}</small></aside>
            <aside><strong>{format!("{}/{}", props.collected, props.total)}</strong><small>{"Pairs Found"}</small></aside>
            <aside><strong>{best_label(props.best.as_ref())}</strong><small>{"Best Score"}</small></aside>
            <button onclick={props.on_new_game.clone()}>{"New Game"}</button>
        </nav>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct TrayProps {
    snapshot: Snapshot,
}

#[function_component(CollectionTray)]
fn tray_component(props: &TrayProps) -> Html {
    let snapshot = &props.snapshot;
    let width = format!("width: {:.0}%", snapshot.progress() * 100.0);

    html! {
        <section class="tray">
            <header>
                {format!("{} / {} pairs collected", snapshot.collected_pairs(), snapshot.total_pairs())}
            </header>
            <div class="progress"><div style={width}/></div>
            if snapshot.collected.is_empty() {
                <p class="empty">{"Matched pairs will appear here..."}</p>
            } else {
                <ul>
                    {
                        for snapshot.collected.iter().map(|pair| html! {
                            <li key={pair.id.to_string()}>{pair.emoji.glyph()}{pair.emoji.glyph()}</li>
                        })
                    }
                </ul>
            }
        </section>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct VictoryProps {
    result: game::GameResult,
    on_close: Callback<MouseEvent>,
    on_new_game: Callback<MouseEvent>,
}

#[function_component(VictoryView)]
fn victory_component(props: &VictoryProps) -> Html {
    let game::GameResult {
        score,
        points,
        new_best,
        rating,
    } = &props.result;

    html! {
        <dialog id="victory" open={true}>
            <article>
                <h2>{"Congratulations!"}</h2>
                <p>{format!("You found all {} pairs and won the game!", game::PAIR_COUNT)}</p>
                <p class="rating">{rating.badge()}{" "}{rating.label()}</p>
                if *new_best {
                    <p class="new-best">{"New Best Score!"}</p>
                }
                <dl>
                    <dt>{"Moves"}</dt><dd>{score.moves.to_string()}</dd>
                    <dt>{"Time"}</dt><dd>{format_clock(score.time)}</dd>
                    <dt>{"Score"}</dt><dd>{points.to_string()}</dd>
                </dl>
                <footer>
                    <button type="reset" onclick={props.on_close.clone()}>{"Close"}</button>
                    <button onclick={props.on_new_game.clone()}>{"Play Again"}</button>
                </footer>
            </article>
        </dialog>
    }
}

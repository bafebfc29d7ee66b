use yew::prelude::*;
use yew_router::prelude::*;
use gloo_timers::callback::Timeout;
use time::macros::format_description;
use shared::models::{VoteId, VoteRecord};
use std::rc::Rc;
use crate::{api, vote_create::VoteCreate, Route, styles::*};

const NOTICE_MILLIS: u32 = 3_000;

#[derive(Clone, Default)]
pub struct VotesState {
    votes: Vec<VoteRecord>,
    loaded: bool,
    error: Option<String>,
    notice: Option<String>,
    generation: u32,
}

impl Reducible for VotesState {
    type Action = Msg;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            Msg::Reload => {
                next.generation = next.generation.wrapping_add(1);
            },
            Msg::VotesReceived(votes) => {
                next.votes = votes;
                next.loaded = true;
                next.error = None;
            },
            Msg::Notice(notice) => {
                next.notice = Some(notice);
            },
            Msg::ClearNotice => {
                next.notice = None;
            },
            Msg::Error(error) => {
                next.loaded = true;
                next.error = Some(error);
            },
        }
        Rc::new(next)
    }
}

pub enum Msg {
    Reload,
    VotesReceived(Vec<VoteRecord>),
    Notice(String),
    ClearNotice,
    Error(String),
}

fn announce(state: &UseReducerHandle<VotesState>, notice: &str) {
    state.dispatch(Msg::Notice(notice.into()));
    state.dispatch(Msg::Reload);

    let state = state.clone();
    Timeout::new(NOTICE_MILLIS, move || state.dispatch(Msg::ClearNotice)).forget();
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn format_created(vote: &VoteRecord) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year] [hour]:[minute] UTC");
    vote.created_at.format(&format).unwrap_or_else(|_| vote.created_at.to_string())
}

#[function_component]
pub fn Votes() -> Html {
    let state = use_reducer(VotesState::default);

    use_effect_with_deps({
        let state = state.clone();
        move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_votes().await {
                    Ok(votes) => state.dispatch(Msg::VotesReceived(votes)),
                    Err(e) => state.dispatch(Msg::Error(e)),
                }
            });
            || ()
        }
    }, state.generation);

    let on_created = {
        let state = state.clone();
        Callback::from(move |_: VoteRecord| announce(&state, "Vote created successfully!"))
    };

    let on_delete = {
        let state = state.clone();
        Callback::from(move |id: VoteId| {
            if !confirm("Are you sure you want to delete this vote?") {
                return;
            }
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::delete_vote(id).await {
                    Ok(()) => announce(&state, "Vote deleted successfully!"),
                    Err(e) => state.dispatch(Msg::Error(e)),
                }
            });
        })
    };

    html! {
        <div class={CONTAINER}>
            <h1 class={combine_classes(HEADING_LG, "text-white")}>{"Voting System"}</h1>

            {if let Some(notice) = &state.notice {
                html! { <div class={alert_style("success")}>{notice}</div> }
            } else { html! {} }}

            <div class="mb-10">
                <VoteCreate {on_created} />
            </div>

            {if let Some(error) = &state.error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}

            {if !state.loaded {
                html! {
                    <div class="flex justify-center p-8">
                        <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading votes..."}</div>
                    </div>
                }
            } else if state.votes.is_empty() && state.error.is_none() {
                html! {
                    <p class={combine_classes(TEXT_MUTED, "text-center p-8")}>
                        {"No votes yet. Create your first vote!"}
                    </p>
                }
            } else {
                html! {
                    <div class="grid gap-4 md:grid-cols-2">
                        {for state.votes.iter().map(|vote| render_vote(vote, &on_delete))}
                    </div>
                }
            }}
        </div>
    }
}

fn render_vote(vote: &VoteRecord, on_delete: &Callback<VoteId>) -> Html {
    let id = vote.id;
    let onclick = on_delete.reform(move |_: MouseEvent| id);

    html! {
        <div class={VOTE_CARD} key={id.to_string()}>
            <div class={FLEX_BETWEEN}>
                <h3 class={HEADING_SM}>{&vote.title}</h3>
                <span class={TEXT_MUTED}>{format!("#{}", id)}</span>
            </div>
            {if let Some(content) = vote.content.as_deref().filter(|c| !c.is_empty()) {
                html! { <p class="text-gray-300 break-words">{content}</p> }
            } else { html! {} }}
            <div class={combine_classes(FLEX_BETWEEN, "mt-auto")}>
                <span class={TEXT_MUTED}>{format_created(vote)}</span>
                <div class="flex gap-2">
                    <Link<Route> to={Route::EditVote { id: id.to_string() }} classes={classes!(button_warning())}>
                        {"Edit"}
                    </Link<Route>>
                    <button class={button_danger()} {onclick}>{"Delete"}</button>
                </div>
            </div>
        </div>
    }
}

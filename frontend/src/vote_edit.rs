use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;
use shared::models::*;
use crate::{api, Route, styles::*};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub id: String,
}

#[derive(Clone)]
enum State {
    Loading,
    Editing { id: VoteId, title: String, content: String, saving: bool, error: Option<String> },
    NotFound,
    Error(String),
}

pub struct VoteEdit {
    state: State,
}

pub enum Msg {
    Loaded(Result<Option<VoteRecord>, String>),
    UpdateTitle(String),
    UpdateContent(String),
    Save,
    Saved(Result<(), String>),
}

impl Component for VoteEdit {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let id = ctx.props().id.clone();
        ctx.link().send_future(async move {
            Msg::Loaded(api::fetch_vote(&id).await)
        });

        Self { state: State::Loading }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match (msg, &mut self.state) {
            (Msg::Loaded(result), _) => {
                self.state = match result {
                    Ok(Some(vote)) => State::Editing {
                        id: vote.id,
                        title: vote.title,
                        content: vote.content.unwrap_or_default(),
                        saving: false,
                        error: None,
                    },
                    Ok(None) => State::NotFound,
                    Err(e) => State::Error(e),
                };
                true
            }
            (Msg::UpdateTitle(value), State::Editing { title, .. }) => {
                *title = value;
                true
            }
            (Msg::UpdateContent(value), State::Editing { content, .. }) => {
                *content = value;
                true
            }
            (Msg::Save, State::Editing { id, title, content, saving, error }) => {
                if title.trim().is_empty() {
                    *error = Some("Please enter a title".into());
                    return true;
                }
                *saving = true;
                *error = None;

                let id = *id;
                let request = UpdateVoteRequest {
                    title: Some(title.trim().to_string()),
                    content: Some(content.trim().to_string()),
                };
                ctx.link().send_future(async move {
                    Msg::Saved(api::update_vote(id, &request).await)
                });
                true
            }
            (Msg::Saved(Ok(())), _) => {
                if let Some(navigator) = ctx.link().navigator() {
                    navigator.push(&Route::Votes);
                }
                false
            }
            (Msg::Saved(Err(e)), State::Editing { saving, error, .. }) => {
                *saving = false;
                *error = Some(e);
                true
            }
            _ => false,
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match &self.state {
            State::Loading => html! {
                <div class={combine_classes("animate-pulse", TEXT_MUTED)}>{"Loading vote..."}</div>
            },
            State::NotFound => html! {
                <div class={alert_style("warning")}>{"This vote does not exist."}</div>
            },
            State::Error(error) => html! {
                <div class={alert_style("error")}>{error}</div>
            },
            State::Editing { id, title, content, saving, error } => {
                self.render_form(ctx, *id, title, content, *saving, error.as_deref())
            }
        };

        html! {
            <div class={BG_PAGE}>
                <div class={CARD}>
                    <h1 class={HEADING_LG}>{"Edit Vote"}</h1>
                    {body}
                    <div class="mt-6 text-center">
                        <Link<Route> to={Route::Votes} classes="text-blue-400 hover:underline">
                            {"Back to votes"}
                        </Link<Route>>
                    </div>
                </div>
            </div>
        }
    }
}

impl VoteEdit {
    fn render_form(
        &self,
        ctx: &Context<Self>,
        id: VoteId,
        title: &str,
        content: &str,
        saving: bool,
        error: Option<&str>,
    ) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Save
        });
        let on_title = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateTitle(input.value())
        });
        let on_content = ctx.link().callback(|e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            Msg::UpdateContent(input.value())
        });

        html! {
            <form {onsubmit} class={SPACE_Y_LG}>
                <p class={TEXT_MUTED}>{format!("Vote #{}", id)}</p>
                {if let Some(error) = error {
                    html! { <div class={alert_style("error")}>{error}</div> }
                } else { html! {} }}
                <div class={SPACE_Y_BASE}>
                    <label class={TEXT_LABEL}>{"Title"}</label>
                    <input type="text" class={INPUT_BASE} value={title.to_string()} oninput={on_title} />
                </div>
                <div class={SPACE_Y_BASE}>
                    <label class={TEXT_LABEL}>{"Content (optional)"}</label>
                    <textarea class={INPUT_BASE} rows="4" value={content.to_string()} oninput={on_content} />
                </div>
                <button type="submit" class={button_primary(true)} disabled={saving}>
                    {if saving { "Saving..." } else { "Save Changes" }}
                </button>
            </form>
        }
    }
}

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use shared::models::*;
use crate::{api, styles::*};

#[derive(Clone, Default)]
pub struct FormState {
    title: String,
    content: String,
    error: Option<String>,
    submitting: bool,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_created: Callback<VoteRecord>,
}

pub struct VoteCreate {
    state: FormState,
}

pub enum Msg {
    UpdateTitle(String),
    UpdateContent(String),
    Submit,
    SubmitResult(Result<VoteRecord, String>),
}

impl Component for VoteCreate {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { state: FormState::default() }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateTitle(title) => {
                self.state.title = title;
                true
            },
            Msg::UpdateContent(content) => {
                self.state.content = content;
                true
            },
            Msg::Submit => {
                if self.state.title.trim().is_empty() {
                    self.state.error = Some("Please enter a title".into());
                    return true;
                }

                let request = CreateVoteRequest {
                    title: Some(self.state.title.trim().to_string()),
                    content: Some(self.state.content.trim().to_string()),
                };
                self.state.submitting = true;
                self.state.error = None;

                ctx.link().send_future(async move {
                    Msg::SubmitResult(api::create_vote(&request).await)
                });
                true
            },
            Msg::SubmitResult(result) => {
                self.state.submitting = false;
                match result {
                    Ok(vote) => {
                        self.state = FormState::default();
                        ctx.props().on_created.emit(vote);
                    }
                    Err(error) => self.state.error = Some(error),
                }
                true
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
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
            <div class={CARD_SECTION}>
                <h2 class={HEADING_MD}>{"Create a Vote"}</h2>
                {if let Some(error) = &self.state.error {
                    html! { <div class={alert_style("error")}>{error}</div> }
                } else { html! {} }}
                <form {onsubmit} class={SPACE_Y_LG}>
                    <div class={SPACE_Y_BASE}>
                        <label class={TEXT_LABEL}>{"Title"}</label>
                        <input type="text" class={INPUT_BASE} value={self.state.title.clone()}
                            oninput={on_title} placeholder="Enter title" />
                    </div>
                    <div class={SPACE_Y_BASE}>
                        <label class={TEXT_LABEL}>{"Content (optional)"}</label>
                        <textarea class={INPUT_BASE} rows="3" value={self.state.content.clone()}
                            oninput={on_content} placeholder="Enter content" />
                    </div>
                    <button type="submit" class={button_primary(true)}
                        disabled={self.state.submitting || self.state.title.trim().is_empty()}>
                        {if self.state.submitting { "Creating..." } else { "Create Vote" }}
                    </button>
                </form>
            </div>
        }
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod config;
mod styles;
mod votes;
mod vote_create;
mod vote_edit;

use crate::{
    votes::Votes,
    vote_edit::VoteEdit,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/ui")] Votes,
    #[at("/ui/edit/:id")] EditVote { id: String },
    #[not_found]
    #[at("/ui/404")] NotFound,
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();

    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                <Link<Route> to={Route::Votes} classes={classes!(
                    "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
                    "transition-colors", "duration-200", "ease-in-out",
                    "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400",
                    if current_route == Some(Route::Votes) {
                        "text-blue-400 border-blue-400 ring-2 ring-blue-500 ring-offset-1 ring-offset-gray-900"
                    } else {
                        ""
                    }
                )}>
                    {"Votes"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-gray-900">
                <Navigation />
                <div class="pt-16">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Votes => html! { <Votes /> },
        Route::EditVote { id } => html! { <VoteEdit {id} /> },
        Route::NotFound => html! {
            <div class="container mx-auto px-4 py-16 text-center">
                <h1 class="text-3xl font-bold text-gray-100 mb-4">{"Page not found"}</h1>
                <Link<Route> to={Route::Votes} classes="text-blue-400 hover:underline">
                    {"Back to votes"}
                </Link<Route>>
            </div>
        },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

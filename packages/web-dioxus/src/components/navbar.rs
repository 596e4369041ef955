use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::routes::Route;

fn nav_links() -> [(&'static str, Route); 7] {
    [
        ("Home", Route::Home {}),
        ("About", Route::About {}),
        ("Services", Route::Services {}),
        ("Admissions", Route::Admissions {}),
        ("Clients", Route::Clients {}),
        ("Testimonials", Route::Testimonials {}),
        ("Contact", Route::Contact {}),
    ]
}

#[component]
pub fn Navbar() -> Element {
    let mut auth = use_auth();
    let navigator = use_navigator();
    let mut menu_open = use_signal(|| false);

    let user_label = auth.user.read().as_ref().map(|u| u.label());

    rsx! {
        nav {
            class: "sticky top-0 z-30 border-b border-white/10 bg-black/70 backdrop-blur",
            div {
                class: "mx-auto flex max-w-7xl items-center justify-between px-4 py-3 sm:px-6",
                Link {
                    to: Route::Home {},
                    class: "text-xl font-bold tracking-wide text-white",
                    "Tech"
                    span { class: "text-orange-500", "Match" }
                }

                button {
                    class: "text-white md:hidden",
                    "aria-label": "Toggle menu",
                    onclick: move |_| menu_open.set(!menu_open()),
                    "\u{2630}"
                }

                div {
                    class: if menu_open() {
                        "absolute left-0 top-full flex w-full flex-col gap-4 bg-black/90 p-4 md:static md:flex md:w-auto md:flex-row md:items-center md:bg-transparent md:p-0"
                    } else {
                        "hidden md:flex md:items-center md:gap-6"
                    },
                    for (label, route) in nav_links() {
                        Link {
                            key: "{label}",
                            to: route,
                            class: "text-sm text-gray-300 hover:text-orange-400",
                            active_class: "text-orange-400",
                            onclick: move |_| menu_open.set(false),
                            "{label}"
                        }
                    }

                    {match user_label {
                        Some(label) => rsx! {
                            Link {
                                to: Route::AccountSecurity {},
                                class: "text-sm text-gray-300 hover:text-orange-400",
                                "{label}"
                            }
                            button {
                                class: "rounded-lg border border-orange-500 px-4 py-2 text-sm text-orange-400 hover:bg-orange-500 hover:text-white",
                                onclick: move |_| {
                                    spawn(async move {
                                        auth.sign_out().await;
                                        navigator.push(Route::Home {});
                                    });
                                },
                                "Sign Out"
                            }
                        },
                        None => rsx! {
                            Link {
                                to: Route::SignIn {},
                                class: "rounded-lg bg-orange-500 px-4 py-2 text-sm font-semibold text-white hover:bg-orange-600",
                                "Get Started"
                            }
                        },
                    }}
                }
            }
        }
    }
}

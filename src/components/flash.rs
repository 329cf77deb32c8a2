//! Flash Banner Component
//!
//! Error presenter: renders each error as an independently dismissible
//! banner. Dismissal is a local removal; banners never auto-expire.

use leptos::prelude::*;

use crate::controller::use_task_controller;
use crate::store::{use_app_store, AppStateStoreFields};

/// Map known server error text to friendlier copy; anything else passes
/// through unchanged.
pub fn friendly_message(message: &str) -> String {
    match message {
        "TypeError: Failed to fetch" => {
            "Failed to reach server. Please try again later.".to_string()
        }
        "Unauthorized" => {
            "Invalid username or password. Please check your username or password.".to_string()
        }
        other => other.to_string(),
    }
}

#[component]
pub fn FlashList() -> impl IntoView {
    let store = use_app_store();
    let ctrl = use_task_controller();

    view! {
        <div class="flash-container">
            <For
                each=move || store.flashes().get()
                key=|flash| flash.id
                children=move |flash| {
                    let id = flash.id;
                    view! {
                        <div class="flash" data-type="error">
                            <svg class="flash__icon" viewBox="0 0 20 20">
                                <path
                                    class="flash__exclaim-border"
                                    d="M3.053 17.193A10 10 0 1 1 16.947 2.807 10 10 0 0 1 3.053 17.193zm12.604-1.536A8 8 0 1 0 4.343 4.343a8 8 0 0 0 11.314 11.314z"
                                    fill-rule="nonzero"
                                />
                                <path
                                    class="flash__exclaim-mark"
                                    d="M9 5h2v6H9V5zm0 8h2v2H9v-2z"
                                    fill-rule="nonzero"
                                />
                            </svg>
                            <span class="flash__message">{friendly_message(&flash.message)}</span>
                            <button
                                type="button"
                                class="flash__close"
                                on:click=move |_| ctrl.dismiss_flash(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_failure_copy() {
        assert_eq!(
            friendly_message("TypeError: Failed to fetch"),
            "Failed to reach server. Please try again later."
        );
    }

    #[test]
    fn test_bad_credentials_copy() {
        assert_eq!(
            friendly_message("Unauthorized"),
            "Invalid username or password. Please check your username or password."
        );
    }

    #[test]
    fn test_unknown_messages_pass_through() {
        assert_eq!(friendly_message("Task not found"), "Task not found");
    }
}

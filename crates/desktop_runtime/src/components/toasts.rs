use super::*;

#[component]
pub(super) fn ToastStack() -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || runtime.toasts.get()
                key=|toast| toast.id
                let:toast
            >
                {{
                    let id = toast.id;
                    let notification = toast.notification;
                    view! {
                        <div class=format!("toast toast-{}", notification.level.token())>
                            <div class="toast-header">
                                <strong>{notification.title}</strong>
                                <button
                                    class="toast-dismiss"
                                    aria-label="Dismiss notification"
                                    on:click=move |_| runtime.dismiss_toast(id)
                                >
                                    "×"
                                </button>
                            </div>
                            <p>{notification.body}</p>
                        </div>
                    }
                }}
            </For>
        </div>
    }
}

use claw_core::{ApiEmpty, DecryptResponse, EncryptResponse};
use maud::{html, Markup, DOCTYPE};

/// Validity choices offered by the encrypt form, in seconds.
pub const EXPIRY_OPTIONS: [(i64, &str); 3] = [(60, "1 minute"), (900, "15 minutes"), (1800, "30 minutes")];

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | claw" }
            }
            body {
                header {
                    nav {
                        a href="/" { "claw" }
                        " "
                        a href="/privacy" { "Privacy" }
                    }
                }
                main { (content) }
            }
        }
    }
}

fn encrypt_form() -> Markup {
    html! {
        form #encrypt-form method="post" action="/encrypt" {
            label for="text" { "Secret" }
            textarea #text name="text" required {}
            label for="expiry" { "Expires after" }
            select #expiry name="expiry" {
                @for (seconds, label) in EXPIRY_OPTIONS {
                    option value=(seconds) { (label) }
                }
            }
            button type="submit" { "Encrypt" }
        }
    }
}

fn decrypt_form(prefill: &str) -> Markup {
    html! {
        form #decrypt-form method="post" action="/decrypt" {
            label for="id_key" { "ID.Key" }
            input #id_key type="text" name="id_key" value=(prefill) required;
            button type="submit" { "Decrypt" }
        }
    }
}

/// Landing page with both forms and, after a submission, its outcome.
pub fn index(outcome: Option<Markup>) -> Markup {
    layout(
        "Share a secret",
        html! {
            @if let Some(outcome) = outcome {
                section #result { (outcome) }
            }
            section {
                h2 { "Encrypt" }
                (encrypt_form())
            }
            section {
                h2 { "Decrypt" }
                (decrypt_form(""))
            }
        },
    )
}

pub fn vault(id: &str) -> Markup {
    layout(
        "Open a secret",
        html! {
            section {
                h2 { "Someone shared a secret with you" }
                p { "Complete the ID.Key below with the key you were given. The secret can only be opened once." }
                (decrypt_form(&format!("{id}.")))
            }
        },
    )
}

pub fn privacy() -> Markup {
    layout(
        "Privacy",
        html! {
            section {
                h2 { "Privacy" }
                p { "Secrets are encrypted by the vault before they are stored and are deleted once opened or expired." }
                p { "The key is never stored next to the secret. Without the full ID.Key nobody can read it, including us." }
            }
        },
    )
}

pub fn not_found() -> Markup {
    layout(
        "Not found",
        html! {
            section {
                h2 { "Nothing here" }
                p { "The page or secret you are looking for does not exist, or has expired." }
                a href="/" { "Back home" }
            }
        },
    )
}

pub fn encrypted(res: &EncryptResponse) -> Markup {
    html! {
        div .success {
            p { "Share this ID.Key. It is valid for " (res.valid_for) "." }
            code #share-token { (res.share_token()) }
        }
    }
}

pub fn decrypted(res: &DecryptResponse) -> Markup {
    html! {
        div .success {
            p { "Decrypted secret:" }
            pre #secret { (res.data) }
        }
    }
}

pub fn failure(err: &ApiEmpty) -> Markup {
    html! {
        div .error {
            p { (err.message) }
        }
    }
}

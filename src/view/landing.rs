use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::service::FormState;

use super::subscription_form;

const PAGE_CSS: &str = r#"
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:system-ui,-apple-system,"Segoe UI",sans-serif;color:#111827;min-height:100vh;background:linear-gradient(135deg,#f8fafc,#dbeafe,#eef2ff)}
.container{max-width:64rem;margin:0 auto;padding:1.5rem}
nav{display:flex;justify-content:space-between;align-items:center}
.brand{display:flex;align-items:center;gap:.75rem;font-size:1.5rem;font-weight:700}
.logo{width:3rem;height:3rem;border-radius:1rem;background:#2563eb;color:#fff;display:flex;align-items:center;justify-content:center}
.muted{color:#4b5563}
.hero{text-align:center;padding:4rem 0}
.hero h1{font-size:4rem;margin-bottom:1rem}
.tagline{font-size:1.5rem;color:#2563eb;margin-bottom:2rem}
.status{display:inline-flex;align-items:center;gap:.75rem;background:#fff;border-radius:999px;padding:.75rem 1.5rem;box-shadow:0 10px 15px rgba(0,0,0,.08)}
.pulse{width:.75rem;height:.75rem;border-radius:50%;background:#3b82f6}
.hero h2{font-size:3rem;margin:1.5rem 0 1rem;color:#1f2937}
.features{display:grid;grid-template-columns:repeat(auto-fit,minmax(14rem,1fr));gap:1.5rem;margin-top:3rem}
.feature{background:rgba(255,255,255,.8);border-radius:1rem;padding:1.5rem}
.feature h3{margin:.75rem 0 .5rem}
.subscribe{display:flex;justify-content:center;padding:4rem 0}
.card{background:#fff;border-radius:1.5rem;padding:2rem;max-width:28rem;width:100%;box-shadow:0 20px 25px rgba(0,0,0,.1)}
.card-header{text-align:center;margin-bottom:1.5rem}
.icon-mail{font-size:3rem;color:#2563eb}
.field{width:100%;padding:1rem;border:1px solid #e5e7eb;border-radius:1rem;font-size:1rem}
.field-error{border-color:#fca5a5;background:#fef2f2}
.error{color:#dc2626;font-size:.875rem;margin-top:.5rem;display:flex;gap:.25rem}
button.primary{width:100%;margin-top:1rem;padding:1rem;border:0;border-radius:1rem;background:#2563eb;color:#fff;font-weight:600;font-size:1rem;cursor:pointer}
button.primary:disabled{opacity:.5;cursor:not-allowed}
button.link{background:none;border:0;color:#2563eb;font-weight:500;cursor:pointer}
.subscribed{text-align:center}
.badge-success{width:4rem;height:4rem;border-radius:50%;background:#dcfce7;color:#16a34a;display:flex;align-items:center;justify-content:center;margin:0 auto 1rem;font-size:2rem}
.hint{color:#2563eb;font-size:.875rem;margin:.5rem 0 1rem}
.platforms{text-align:center;padding:4rem 0}
.platform-list{display:flex;justify-content:center;gap:2rem;margin-top:2rem;opacity:.5}
footer{border-top:1px solid #e5e7eb;margin-top:2rem;padding-top:2rem;text-align:center}
"#;

struct Feature {
    icon: &'static str,
    title: &'static str,
    blurb: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        icon: "👥",
        title: "Shared Rides",
        blurb: "Connect with verified commuters on your route",
    },
    Feature {
        icon: "🛡️",
        title: "Safe & Secure",
        blurb: "Background checks and real-time tracking",
    },
    Feature {
        icon: "📍",
        title: "Smart Routes",
        blurb: "AI-powered route optimization",
    },
];

/// The full "coming soon" page with the subscription form in `state`
pub fn landing_page(state: &FormState, email: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Commuter | Coming Soon" }
                meta name="description" content="Smart Daily Rides. Shared. Safe. Simple.";
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                div.container {
                    nav {
                        div.brand {
                            div.logo aria-hidden="true" { "🚗" }
                            span { "Commuter" }
                        }
                        span.muted { "Coming Soon" }
                    }

                    section.hero {
                        h1 { "Commuter" }
                        p.tagline { "Smart Daily Rides. Shared. Safe. Simple." }
                        div.status {
                            span.pulse {}
                            span { "Currently in Development" }
                        }
                        h2 { "Coming Soon" }
                        p.muted {
                            "We're building the future of daily commuting. Join thousands of early adopters and be the first to know when we launch."
                        }
                        div.features {
                            @for feature in &FEATURES {
                                div.feature {
                                    div aria-hidden="true" { (feature.icon) }
                                    h3 { (feature.title) }
                                    p.muted { (feature.blurb) }
                                }
                            }
                        }
                    }

                    (subscription_form(state, email))

                    section.platforms {
                        h3 { "Coming to Your Platform" }
                        div.platform-list {
                            @for platform in ["iOS", "Android"] {
                                div {
                                    div aria-hidden="true" { "📱" }
                                    strong { (platform) }
                                    p.muted { "Coming Soon" }
                                }
                            }
                        }
                    }

                    footer {
                        p.muted { "Made with ❤️ by the Commuter Team in Egypt" }
                    }
                }
            }
        }
    }
}

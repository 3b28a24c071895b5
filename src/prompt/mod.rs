use serde_json::{json, Value};

pub const INITIAL_PROMPT: &str = "A landing page for a neighbourhood coffee roastery with a dark, warm theme, a menu of seasonal drinks, a story section about the roasters and a newsletter sign-up.";

pub const INITIAL_SUMMARY: &str = "This is AI Underdog. Describe your idea and click Generate!";

pub const PLANNING_STATUS: &str = "The AI is formulating a plan...";

/// Shown before the first successful generation and after any failed one.
pub const PLACEHOLDER_DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>AI Underdog</title>
  <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="min-h-screen flex items-center justify-center bg-gradient-to-br from-slate-900 to-sky-950 text-slate-200">
  <main class="text-center px-6">
    <h1 class="text-4xl font-bold tracking-wide mb-4">Your website will appear here</h1>
    <p class="text-slate-400">Describe what you want to build and press <span class="text-sky-400">Generate Project</span>.</p>
  </main>
</body>
</html>
"#;

fn design_rules() -> &'static str {
r#"Design & Code Rules:
- Single file: return one complete, valid `index.html` document. No external local assets.
- Tailwind CSS from the CDN in <head>: <script src="https://cdn.tailwindcss.com"></script>
- Typography: load one modern Google Font (Inter, Poppins or Roboto) in <head> and apply it to <body>.
- Images: use real photo URLs only.
  • Picsum: "https://picsum.photos/600/400", seeded "https://picsum.photos/seed/coffee/600/400", by id "https://picsum.photos/id/237/600/400". Modifiers such as "?grayscale" or "?blur=2" are allowed.
  • Unsplash source URLs ("https://source.unsplash.com/600x400/?pizza") may be used as a fallback.
  • Seeds and keywords must be actual words relevant to the request (food, city, fitness, workspace). Never leave placeholders such as <keyword>.
  • Every <img> carries a meaningful alt attribute.
- Icons: pick icons that match the subject.
  • Bootstrap Icons: <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.10.5/font/bootstrap-icons.css" />
  • Heroicons inline SVG, or Font Awesome Free.
  • Put icons next to buttons, nav links and section titles.
- Visual polish: consistent spacing and type scale, gradients ("bg-gradient-to-r from-slate-900 to-gray-800"), glassmorphism (backdrop blur with translucent panels), "shadow-xl rounded-xl" cards, hover transitions ("hover:scale-105 transition-all duration-300"), max-width containers.
- Responsive: use the sm:, md:, lg: and xl: variants so the page works from phones to wide screens.
- Interactivity: all JavaScript goes in one <script> right before </body>. Check an element exists before touching it (if (btn) { btn.addEventListener(...) }).
- Semantics: <header>, <nav>, <main>, <section>, <footer>."#
}

/// Fixed instruction sent with every generation request.
pub fn system_instruction() -> String {
    format!(
r#"You are "Website Weaver", an expert web developer who turns a short description into a polished, fully responsive single-page website.

You build landing pages, app look-alikes (video platforms, food delivery, dating apps), portfolios and creative interfaces, always inside a single HTML file.

Process:
1. Read the request and infer a sensible layout (header, hero, features, testimonials, call to action, footer).
2. Plan the sections the way a senior UX designer would. Pick what fits the subject:
   - a dating app wants profile cards, a match button and a chat preview;
   - a restaurant wants a menu, featured dishes and a reservation call to action.
3. Write the complete document with professional styling and just enough JavaScript for interactivity.

{rules}

Output:
Return a single JSON object with exactly these fields:
- "summary": one sentence describing the site you built.
- "thinkingProcess": an array of short strings, one per planning step, in order.
- "code": the complete HTML document, starting with <!DOCTYPE html>.
Do not wrap the JSON in markdown fences and do not add commentary outside it."#,
        rules = design_rules()
    )
}

/// Response schema in the Gemini `responseSchema` dialect.
pub fn gemini_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A brief, one-sentence summary of the project you are creating."
            },
            "thinkingProcess": {
                "type": "ARRAY",
                "description": "The step-by-step plan used to build the website.",
                "items": { "type": "STRING" }
            },
            "code": {
                "type": "STRING",
                "description": "The complete, raw HTML code for the single-page website."
            }
        },
        "required": ["summary", "thinkingProcess", "code"]
    })
}

/// The same schema as standard JSON Schema, for OpenAI structured outputs.
pub fn json_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "thinkingProcess": { "type": "array", "items": { "type": "string" } },
            "code": { "type": "string" }
        },
        "required": ["summary", "thinkingProcess", "code"],
        "additionalProperties": false
    })
}

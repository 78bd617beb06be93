use axum::{extract::State, response::Html};

use crate::AppState;

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Transaction Assistance Chatbot</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; padding: 0 1rem; }
  form { display: grid; gap: 0.75rem; margin-bottom: 1.5rem; }
  input[type=text] { padding: 0.5rem; font-size: 1rem; }
  section { margin-top: 1rem; }
  pre { white-space: pre-wrap; background: #f5f5f5; padding: 0.75rem; border-radius: 4px; }
  .errors { color: #b00020; }
  .hint { color: #555; font-size: 0.9rem; }
</style>
</head>
<body>
<h1>OCR and Knowledge Base Query</h1>
<p class="hint">{{OCR_STATUS}}</p>
<form id="query-form">
  <label>Upload an image (JPG, JPEG, PNG, up to 5 MiB)
    <input type="file" name="image" accept=".jpg,.jpeg,.png,image/jpeg,image/png">
  </label>
  <label>Your question
    <input type="text" name="query" placeholder="Describe what you need help with">
  </label>
  <button type="submit">Submit</button>
</form>

<section id="errors" class="errors" hidden></section>
<section id="extracted" hidden><h2>Extracted text</h2><pre></pre></section>
<section id="answer" hidden><h2>Answer</h2><pre></pre></section>
<section id="citations" hidden><h2>Citations</h2><ol></ol></section>

<script>
const form = document.getElementById("query-form");

function show(id, visible) {
  document.getElementById(id).hidden = !visible;
}

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  ["errors", "extracted", "answer", "citations"].forEach((id) => show(id, false));
  const button = form.querySelector("button");
  button.disabled = true;

  try {
    const response = await fetch("/api/query", { method: "POST", body: new FormData(form) });
    const body = await response.json();

    const errors = body.errors || (body.error ? [{ code: "REQUEST_FAILED", message: body.error }] : []);
    if (errors.length) {
      const list = document.getElementById("errors");
      list.replaceChildren(...errors.map((e) => {
        const p = document.createElement("p");
        p.textContent = e.message;
        return p;
      }));
      show("errors", true);
    }

    if (body.extracted_text) {
      document.querySelector("#extracted pre").textContent = body.extracted_text;
      show("extracted", true);
    }

    if (body.result) {
      document.querySelector("#answer pre").textContent = body.result.answer;
      show("answer", true);

      const refs = body.result.citations.flatMap((c) => c.references);
      if (refs.length) {
        document.querySelector("#citations ol").replaceChildren(...refs.map((r) => {
          const li = document.createElement("li");
          li.textContent = (r.location ? r.location + ": " : "") + (r.content || "");
          return li;
        }));
        show("citations", true);
      }
    }
  } catch (err) {
    const list = document.getElementById("errors");
    list.textContent = "Request failed: " + err;
    show("errors", true);
  } finally {
    button.disabled = false;
  }
});
</script>
</body>
</html>
"##;

pub fn render_index(ocr_enabled: bool) -> String {
    let status = if ocr_enabled {
        "Text in uploaded images is read with OCR and added to your question."
    } else {
        "OCR is disabled on this server: uploaded images are checked but their text is not read."
    };
    INDEX_TEMPLATE.replace("{{OCR_STATUS}}", status)
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.query_service.ocr_enabled()))
}

//! Server-rendered HTML for the weather home page.

use serde_json::Number;

use crate::models::WeatherReport;

/// What the page body shows below the search form.
#[derive(Debug)]
pub enum PageView<'a> {
    /// No city requested and no default configured.
    Prompt,
    Error(&'a str),
    Report(&'a WeatherReport),
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Weather App V2</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-blue-50 min-h-screen flex flex-col items-center p-6">
    <div class="max-w-xl w-full bg-white rounded-3xl shadow-2xl overflow-hidden">
        <div class="bg-blue-600 p-6">
            <h1 class="text-3xl font-bold text-white text-center mb-4">Global Weather</h1>
            <form action="/" method="get" class="flex gap-2">
                <input type="text" name="city" placeholder="Enter city (e.g. Tokyo)"
                       class="flex-1 p-3 rounded-lg focus:outline-none text-gray-800" required>
                <button type="submit" class="bg-yellow-400 text-blue-900 font-bold py-3 px-6 rounded-lg hover:bg-yellow-300 transition">
                    Search
                </button>
            </form>
        </div>

        <div class="p-8">
"#;

const TAIL: &str = r#"        </div>
    </div>
</body>
</html>
"#;

pub fn render(view: PageView<'_>) -> String {
    let body = match view {
        PageView::Prompt => r#"            <div class="text-center text-gray-400 py-10">
                Search for a city to see the forecast.
            </div>
"#
        .to_string(),
        PageView::Error(message) => format!(
            r#"            <div class="bg-red-100 text-red-700 p-4 rounded-lg text-center font-bold">
                {}
            </div>
"#,
            escape_html(message)
        ),
        PageView::Report(report) => render_report(report),
    };

    format!("{HEAD}{body}{TAIL}")
}

fn render_report(report: &WeatherReport) -> String {
    let city = &report.location.name;
    let api_link: String = url::form_urlencoded::byte_serialize(city.as_bytes()).collect();

    format!(
        r#"            <div class="text-center">
                <h2 class="text-4xl font-bold text-gray-800 mb-1">{city}</h2>
                <p class="text-gray-500 uppercase tracking-wide text-sm mb-8">{country}</p>

                <div class="flex justify-center items-center gap-4 mb-8">
                    <div class="text-7xl font-bold text-blue-600">{temperature}°</div>
                    <div class="text-left">
                        <div class="text-xl font-semibold text-gray-700">{description}</div>
                        <div class="text-sm text-gray-500">Air Quality: <span class="font-bold {aqi_class}">{aqi}</span></div>
                    </div>
                </div>

                <div class="bg-gray-100 p-6 rounded-xl border-l-4 border-blue-500 text-left">
                    <h3 class="text-xs font-bold text-gray-400 uppercase mb-2">AI Forecast</h3>
                    <p class="text-gray-700 italic" style="white-space: pre-wrap;">"{summary}"</p>
                </div>
            </div>

            <div class="mt-8 pt-6 border-t border-gray-100 text-center text-xs text-gray-400">
                <p>API Endpoint for Developers:</p>
                <code class="bg-gray-100 p-1 rounded">/api/weather?city={api_link}</code>
            </div>
"#,
        city = escape_html(city),
        country = escape_html(&report.location.country),
        temperature = report.weather.temperature,
        description = escape_html(&report.weather.description),
        aqi_class = aqi_class(report.weather.aqi.as_ref()),
        aqi = escape_html(&report.weather.aqi_label()),
        summary = escape_html(&report.summary),
        api_link = escape_html(&api_link),
    )
}

fn aqi_class(aqi: Option<&Number>) -> &'static str {
    match aqi.and_then(Number::as_f64) {
        Some(value) if value <= 50.0 => "text-green-500",
        Some(_) => "text-orange-500",
        None => "text-gray-400",
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

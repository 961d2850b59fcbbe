//! `ecosystem.config.js` rendering.

use tera::{Context, Tera};

use super::{ProcessDescriptor, ProcessError};

/// Template for the process manager's ecosystem file.
///
/// Uses Tera template syntax. Strings go through `json_encode` so quotes and
/// backslashes survive as valid JavaScript literals.
pub const ECOSYSTEM_TEMPLATE: &str = r#"module.exports = {
  apps: [
{%- for app in apps %}
    {
      name: {{ app.name | json_encode() }},
      script: {{ app.script | json_encode() }},
      args: {{ app.args | json_encode() }},
      cwd: {{ app.cwd | json_encode() }},
      instances: {{ app.instances }},
      autorestart: {{ app.autorestart }},
      watch: {{ app.watch }},
      max_memory_restart: {{ app.max_memory_restart | json_encode() }},
      env: {
{%- for key, value in app.env %}
        {{ key | json_encode() }}: {{ value | json_encode() }}{% if not loop.last %},{% endif %}
{%- endfor %}
      },
      error_file: {{ app.error_file | json_encode() }},
      out_file: {{ app.out_file | json_encode() }},
      log_file: {{ app.log_file | json_encode() }},
      time: {{ app.time }}
    }{% if not loop.last %},{% endif %}
{%- endfor %}
  ]
};
"#;

pub(super) fn render(apps: &[ProcessDescriptor]) -> Result<String, ProcessError> {
    let mut tera = Tera::default();
    tera.add_raw_template("ecosystem.config.js", ECOSYSTEM_TEMPLATE)?;

    let mut context = Context::new();
    context.insert("apps", apps);

    let rendered = tera.render("ecosystem.config.js", &context)?;
    Ok(rendered)
}

//! Runtime bridge script injection (spec §4.3): a small `<script>` block
//! exposing `geaRuntimeLLM` and `geaRuntimeStore` globals the generated app
//! can call instead of reaching out to the network — this is what makes
//! "no network calls" (enforced by the scanner and CSP) survivable for
//! apps whose plan called for model-backed or persistent behavior.

/// The bridge `<script>` block injected once per document.
pub fn script_tag() -> String {
    format!("<script>\n{}\n</script>", BRIDGE_JS)
}

const BRIDGE_JS: &str = r#"(function(global) {
  if (global.geaRuntimeLLM && global.geaRuntimeStore) return;

  global.geaRuntimeLLM = {
    complete: function() {
      return Promise.reject(new Error("geaRuntimeLLM is not available in the smoke-test sandbox"));
    }
  };

  global.geaRuntimeStore = (function() {
    var data = Object.create(null);
    return {
      get: function(key) { return data[key]; },
      set: function(key, value) { data[key] = value; },
      remove: function(key) { delete data[key]; },
      keys: function() { return Object.keys(data); }
    };
  })();
})(window);"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_defines_both_globals() {
        let tag = script_tag();
        assert!(tag.contains("geaRuntimeLLM"));
        assert!(tag.contains("geaRuntimeStore"));
    }

    #[test]
    fn script_is_guarded_against_double_definition() {
        let tag = script_tag();
        assert!(tag.contains("if (global.geaRuntimeLLM"));
    }
}

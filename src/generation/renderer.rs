//! Tera-based template renderer implementation

use tera::{Context, Tera};

use crate::generation::{
    ArtifactKind, GenerationError, RenderedFile, ServiceContext, TemplateRenderer, TemplateSet,
    template_file_name,
};

/// Tera-based template renderer
pub struct TeraTemplateRenderer {
    tera: Tera,
}

impl TeraTemplateRenderer {
    /// Compile a template set; syntax errors surface here rather than per service
    pub fn new(templates: &TemplateSet) -> Result<Self, GenerationError> {
        let mut tera = Tera::default();
        // Go sources must never be HTML-escaped
        tera.autoescape_on(vec![]);

        for kind in ArtifactKind::all() {
            tera.add_raw_template(template_file_name(kind), templates.get(kind))?;
        }

        Ok(Self { tera })
    }

    /// Renderer over the embedded templates
    pub fn embedded() -> Result<Self, GenerationError> {
        Self::new(&TemplateSet::embedded()?)
    }
}

impl TemplateRenderer for TeraTemplateRenderer {
    fn render(&self, context: &ServiceContext) -> Result<Vec<RenderedFile>, GenerationError> {
        let tera_context = Context::from_serialize(context)?;

        ArtifactKind::all()
            .into_iter()
            .map(|kind| -> Result<RenderedFile, GenerationError> {
                let mut content = self.tera.render(template_file_name(kind), &tera_context)?;
                if !content.ends_with('\n') {
                    content.push('\n');
                }
                Ok(RenderedFile { kind, content })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorStatusTable;
    use crate::generation::build_service_context;
    use crate::generation::templates::TemplateSource;
    use crate::model::{Declaration, Field, Operation};
    use crate::rest::RestResolver;

    fn my_service() -> Declaration {
        Declaration {
            doc_lines: vec![r#"// @RestService( path = "/api")"#.to_string()],
            package_name: "testData".to_string(),
            name: "MyService".to_string(),
            operations: vec![Operation {
                doc_lines: vec![r#"// @RestOperation(path = "/person", method = "GET")"#.to_string()],
                name: "doit".to_string(),
                input_args: vec![Field::new("uid", "int"), Field::new("subuid", "string")],
                output_args: vec![Field::unnamed("error")],
            }],
        }
    }

    fn render(declaration: &Declaration) -> Vec<RenderedFile> {
        let context = build_service_context(
            &RestResolver::default(),
            &ErrorStatusTable::default(),
            declaration,
        );
        TeraTemplateRenderer::embedded()
            .unwrap()
            .render(&context)
            .unwrap()
    }

    #[test]
    fn test_render_handlers() {
        let files = render(&my_service());
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].kind, ArtifactKind::Handlers);

        let handlers = &files[0].content;
        assert!(handlers.starts_with("// Code generated by restgen. DO NOT EDIT."));
        assert!(handlers.contains("package testData\n"));
        assert!(handlers.contains("func (ts *MyService) HttpHandler() http.Handler {"));
        assert!(handlers.contains("func doit(service *MyService) http.HandlerFunc {"));
        assert!(handlers.contains(
            r#"router.HandleFunc("/api/person", doit(ts)).Methods("GET")"#
        ));
        assert!(handlers.contains(r#"uidValue, err := strconv.Atoi(r.URL.Query().Get("uid"))"#));
        assert!(handlers.contains("uid := int(uidValue)"));
        assert!(handlers.contains(r#"subuid := r.URL.Query().Get("subuid")"#));
        assert!(handlers.contains("err = service.doit(uid,subuid)"));
        assert!(handlers.contains("w.WriteHeader(http.StatusNoContent)"));
        assert!(!handlers.contains("json.NewDecoder"));
        assert!(!handlers.contains("&amp;"));
    }

    #[test]
    fn test_render_test_helpers() {
        let files = render(&my_service());
        assert_eq!(files[1].kind, ArtifactKind::TestHelpers);

        let helpers = &files[1].content;
        assert!(helpers.contains("func doitTestHelper"));
        assert!(helpers.contains(r#"const doitTestURL = "/api/person?uid=1&subuid=test-subuid""#));
        assert!(helpers.contains(r#"http.NewRequest("GET", doitTestURL, nil)"#));
        assert!(helpers.contains("(int, interface{}, error)"));
    }

    #[test]
    fn test_render_body_and_output() {
        let mut service = my_service();
        service.operations = vec![Operation {
            doc_lines: vec![r#"// @RestOperation(path = "/person/{uid}", method = "POST")"#.to_string()],
            name: "create".to_string(),
            input_args: vec![Field::new("uid", "string"), Field::new("person", "Person")],
            output_args: vec![Field::unnamed("Person"), Field::unnamed("error")],
        }];

        let files = render(&service);
        let handlers = &files[0].content;
        assert!(handlers.contains(r#"uid := mux.Vars(r)["uid"]"#));
        assert!(handlers.contains("var person Person"));
        assert!(handlers.contains("err = json.NewDecoder(r.Body).Decode(&person)"));
        assert!(handlers.contains("result, err := service.create(uid,person)"));
        assert!(handlers.contains("err = json.NewEncoder(w).Encode(result)"));

        let helpers = &files[1].content;
        assert!(helpers.contains(
            "func createTestHelper(t *testing.T, service *MyService, input Person) (int, *Person, error) {"
        ));
        assert!(helpers.contains("var result Person"));
    }

    #[test]
    fn test_render_declares_unbound_arguments() {
        let mut service = my_service();
        service.operations = vec![Operation {
            doc_lines: vec![r#"// @RestOperation(path = "/person", method = "GET")"#.to_string()],
            name: "doit".to_string(),
            input_args: vec![Field::new("uid", "string"), Field::new("person", "Person")],
            output_args: vec![Field::unnamed("Person"), Field::unnamed("error")],
        }];

        let files = render(&service);
        let handlers = &files[0].content;
        let declaration = handlers.find("\t\tvar person Person\n").unwrap();
        let call = handlers.find("result, err := service.doit(uid,person)").unwrap();
        assert!(declaration < call);
        assert!(!handlers.contains("json.NewDecoder"));
    }

    #[test]
    fn test_render_service_without_operations() {
        let mut service = my_service();
        service.operations.clear();

        let files = render(&service);
        let handlers = &files[0].content;
        assert!(handlers.contains("func (ts *MyService) HttpHandlerWithRouter(router *mux.Router) *mux.Router {\n\treturn router\n}"));
        assert!(!handlers.contains("http.HandlerFunc"));

        let helpers = &files[1].content;
        assert_eq!(
            helpers,
            "// Code generated by restgen. DO NOT EDIT.\n\npackage testData\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let first = render(&my_service());
        let second = render(&my_service());
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let templates = TemplateSet {
            handlers: "{% for x in %}".to_string(),
            test_helpers: String::new(),
            source: TemplateSource::Embedded,
        };
        assert!(matches!(
            TeraTemplateRenderer::new(&templates),
            Err(GenerationError::RenderError(_))
        ));
    }
}

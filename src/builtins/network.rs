// ABOUTME: HTTP builtins — thin wrapper over the pluggable HttpClient collaborator

use crate::error::InterpretError;
use crate::interpreter::Interpreter;

pub fn http_get_print(interp: &mut Interpreter, url: &str) -> Result<(), InterpretError> {
    let (status, body) = interp.http.get(url)?;
    interp.output(&format!("{} {}", status, body));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::HttpClient;

    struct FailingHttp;
    impl HttpClient for FailingHttp {
        fn get(&self, _url: &str) -> Result<(u16, String), InterpretError> {
            Err(InterpretError::IOError("연결 실패".to_string()))
        }
    }

    struct FakeHttp;
    impl HttpClient for FakeHttp {
        fn get(&self, url: &str) -> Result<(u16, String), InterpretError> {
            Ok((200, format!("fetched {}", url)))
        }
    }

    #[test]
    fn successful_get_is_routed_through_the_http_collaborator() {
        let mut interp = Interpreter::new();
        interp.http = Box::new(FakeHttp);
        assert!(http_get_print(&mut interp, "http://example.com").is_ok());
    }

    #[test]
    fn collaborator_errors_propagate_as_io_errors() {
        let mut interp = Interpreter::new();
        interp.http = Box::new(FailingHttp);
        assert!(http_get_print(&mut interp, "http://example.com").is_err());
    }
}

pub mod whisper_api_recognizer;

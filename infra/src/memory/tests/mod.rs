mod refresh_token_repository_tests;

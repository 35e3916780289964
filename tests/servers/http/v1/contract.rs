use swarm_tracker_test_helpers::configuration;

use crate::servers::http::Started;

#[tokio::test]
async fn environment_should_be_started_and_stopped() {
    let env = Started::new(&configuration::ephemeral()).await;

    env.stop().await;
}

mod for_all_config_modes {

    mod receiving_an_announce_request {

        // Announce request documentation:
        //
        // BEP 03. The BitTorrent Protocol Specification
        // https://www.bittorrent.org/beps/bep_0003.html

        use swarm_tracker_primitives::peer::fixture::PeerBuilder;
        use swarm_tracker_test_helpers::{configuration, random};
        use tracing::level_filters::LevelFilter;

        use crate::common::fixtures::sample_info_hash;
        use crate::common::logging::{tracing_stderr_init, INIT};
        use crate::servers::http::asserts::{
            assert_announce_response, assert_empty_announce_response, assert_failure_reason, assert_not_found,
        };
        use crate::servers::http::client::Client;
        use crate::servers::http::requests::QueryBuilder;
        use crate::servers::http::Started;

        #[tokio::test]
        async fn should_respond_with_an_empty_peer_list_to_the_first_peer_of_a_swarm() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address())
                .announce(&QueryBuilder::default().query())
                .await;

            assert_empty_announce_response(response).await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_url_query_component_is_empty() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address()).get("announce").await;

            assert_failure_reason(response, "missing info_hash").await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_info_hash_param_is_missing() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address())
                .announce(&QueryBuilder::default().without_info_hash().query())
                .await;

            assert_failure_reason(response, "missing info_hash").await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_info_hash_param_does_not_decode_to_20_bytes() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let client = Client::new(*env.bind_address());

            for invalid_info_hash in ["%3B", "%3B%24U%04", "%ZZ", "%3"] {
                let response = client
                    .get(&format!("announce?info_hash={invalid_info_hash}&peer_id=-qB00000000000000001&port=17548"))
                    .await;

                assert_failure_reason(response, "invalid info_hash length").await;
            }

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_peer_id_param_is_missing() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address())
                .announce(&QueryBuilder::default().without_peer_id().query())
                .await;

            assert_failure_reason(response, "missing peer_id").await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_peer_id_param_is_not_20_bytes_long() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let client = Client::new(*env.bind_address());

            for invalid_peer_id in ["-qB0000000000000000", "-qB000000000000000001"] {
                let response = client
                    .announce(&QueryBuilder::default().with_peer_id(invalid_peer_id).query())
                    .await;

                assert_failure_reason(response, "invalid peer_id length").await;
            }

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_port_param_is_missing_or_invalid() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let client = Client::new(*env.bind_address());

            let response = client.announce(&QueryBuilder::default().without_port().query()).await;

            assert_failure_reason(response, "missing port").await;

            let response = client.announce(&QueryBuilder::default().with_port(0).query()).await;

            assert_failure_reason(response, "missing port").await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_return_the_list_of_previously_announced_peers() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            // Peer 1
            let previously_announced_peer = PeerBuilder::leecher().build();

            env.add_swarm_peer(&sample_info_hash(), &previously_announced_peer).await;

            // Peer 2
            let response = Client::new(*env.bind_address())
                .announce(&QueryBuilder::default().query())
                .await;

            assert_announce_response(
                response,
                b"d8:intervali1800e5:peersld2:id20:-qB000000000000000022:ip9:127.0.0.24:porti8080eeee",
            )
            .await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_not_include_the_announcing_peer_in_its_own_list() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let client = Client::new(*env.bind_address());

            client.announce(&QueryBuilder::default().query()).await;

            let response = client.announce(&QueryBuilder::default().query()).await;

            assert_empty_announce_response(response).await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_keep_the_swarms_of_different_torrents_apart() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let client = Client::new(*env.bind_address());

            let info_hash = random::info_hash();
            let other_info_hash = random::info_hash();
            let peer_id = random::peer_id();

            client
                .announce(
                    &QueryBuilder::default()
                        .with_info_hash(&info_hash)
                        .with_peer_id(&peer_id.to_string())
                        .query(),
                )
                .await;

            let response = client
                .announce(&QueryBuilder::default().with_info_hash(&other_info_hash).query())
                .await;

            assert_empty_announce_response(response).await;

            let peers = env.tracker.get_swarm_peers(&info_hash).await;

            assert_eq!(peers.len(), 1);
            assert_eq!(peers[0].peer_id, peer_id);

            env.stop().await;
        }

        #[tokio::test]
        async fn should_remove_the_peer_from_the_swarm_when_it_stops() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let client = Client::new(*env.bind_address());

            client
                .announce(&QueryBuilder::default().with_peer_id("-qB00000000000000002").query())
                .await;

            client
                .announce(
                    &QueryBuilder::default()
                        .with_peer_id("-qB00000000000000002")
                        .with_event("stopped")
                        .query(),
                )
                .await;

            let response = client.announce(&QueryBuilder::default().query()).await;

            assert_empty_announce_response(response).await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_store_the_ip_param_as_the_peer_address() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            Client::new(*env.bind_address())
                .announce(&QueryBuilder::default().with_ip("peer.example.org").query())
                .await;

            let peers = env.tracker.get_swarm_peers(&sample_info_hash()).await;

            assert_eq!(peers.len(), 1);
            assert_eq!(peers[0].ip, "peer.example.org");

            env.stop().await;
        }

        #[tokio::test]
        async fn should_store_the_connection_address_when_there_is_no_ip_param() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            Client::new(*env.bind_address())
                .announce(&QueryBuilder::default().query())
                .await;

            let peers = env.tracker.get_swarm_peers(&sample_info_hash()).await;

            assert_eq!(peers[0].ip, "127.0.0.1");

            env.stop().await;
        }

        #[tokio::test]
        async fn should_answer_not_found_for_any_other_path() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address()).get("scrape?info_hash=%3B").await;

            assert_not_found(response).await;

            env.stop().await;
        }
    }

    mod receiving_a_swarm_listing_request {
        use serde_json::Value;
        use swarm_tracker_primitives::peer::fixture::PeerBuilder;
        use swarm_tracker_swarm_repository::repository::RepositoryAsync;
        use swarm_tracker_test_helpers::configuration;
        use tracing::level_filters::LevelFilter;

        use crate::common::fixtures::{invalid_info_hashes, sample_info_hash};
        use crate::common::logging::{tracing_stderr_init, INIT};
        use crate::servers::http::asserts::assert_not_found;
        use crate::servers::http::client::Client;
        use crate::servers::http::Started;

        #[tokio::test]
        async fn should_list_the_peers_of_the_swarm_as_json() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            env.add_swarm_peer(&sample_info_hash(), &PeerBuilder::leecher().build()).await;

            let response = Client::new(*env.bind_address()).swarm(&sample_info_hash()).await;

            assert_eq!(response.status(), 200);
            assert_eq!(response.headers().get("content-type").unwrap(), "application/json");

            let peers: Value = response.json().await.unwrap();

            assert_eq!(peers.as_array().unwrap().len(), 1);
            assert_eq!(peers[0]["peerId"], "-qB00000000000000002");
            assert_eq!(peers[0]["ip"], "127.0.0.2");
            assert_eq!(peers[0]["port"], 8080);
            assert_eq!(peers[0]["left"], 10);
            assert!(peers[0]["lastAnnounce"].is_u64());

            env.stop().await;
        }

        #[tokio::test]
        async fn should_return_an_empty_list_for_an_unknown_swarm_without_creating_it() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address()).swarm(&sample_info_hash()).await;

            assert_eq!(response.status(), 200);
            assert_eq!(response.text().await.unwrap(), "[]");
            assert!(env.tracker.swarms.is_empty());

            env.stop().await;
        }

        #[tokio::test]
        async fn should_answer_not_found_when_the_path_is_not_a_40_hex_chars_info_hash() {
            INIT.call_once(|| {
                tracing_stderr_init(LevelFilter::ERROR);
            });

            let env = Started::new(&configuration::ephemeral()).await;

            let client = Client::new(*env.bind_address());

            for invalid_info_hash in invalid_info_hashes() {
                let response = client.get(&invalid_info_hash).await;

                assert_not_found(response).await;
            }

            env.stop().await;
        }
    }
}

mod configured_with_an_allow_list {
    use std::str::FromStr;

    use swarm_tracker_primitives::info_hash::InfoHash;
    use swarm_tracker_swarm_repository::repository::RepositoryAsync;
    use swarm_tracker_test_helpers::configuration;
    use tracing::level_filters::LevelFilter;

    use crate::common::fixtures::sample_info_hash;
    use crate::common::logging::{tracing_stderr_init, INIT};
    use crate::servers::http::asserts::{assert_empty_announce_response, assert_not_found};
    use crate::servers::http::client::Client;
    use crate::servers::http::requests::QueryBuilder;
    use crate::servers::http::Started;

    fn other_info_hash() -> InfoHash {
        InfoHash::from_str("0000000000000000000000000000000000000001").unwrap()
    }

    #[tokio::test]
    async fn should_answer_not_found_when_the_torrent_is_not_allowed() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral_with_allowed_info_hashes(&[other_info_hash()])).await;

        let client = Client::new(*env.bind_address());

        assert_not_found(client.announce(&QueryBuilder::default().query()).await).await;
        assert_not_found(client.swarm(&sample_info_hash()).await).await;

        assert!(env.tracker.swarms.is_empty());

        env.stop().await;
    }

    #[tokio::test]
    async fn should_announce_an_allowed_torrent() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral_with_allowed_info_hashes(&[sample_info_hash()])).await;

        let response = Client::new(*env.bind_address())
            .announce(&QueryBuilder::default().query())
            .await;

        assert_empty_announce_response(response).await;

        env.stop().await;
    }
}

mod configured_with_legacy_failure_codes {
    use std::str::FromStr;

    use swarm_tracker_primitives::info_hash::InfoHash;
    use swarm_tracker_test_helpers::configuration;
    use tracing::level_filters::LevelFilter;

    use crate::common::logging::{tracing_stderr_init, INIT};
    use crate::servers::http::asserts::assert_failure_code;
    use crate::servers::http::client::Client;
    use crate::servers::http::requests::QueryBuilder;
    use crate::servers::http::Started;

    #[tokio::test]
    async fn should_answer_the_numeric_code_of_the_first_failing_check() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral_with_legacy_failure_codes()).await;

        let client = Client::new(*env.bind_address());

        assert_failure_code(client.get("announce").await, 101).await;
        assert_failure_code(client.announce(&QueryBuilder::default().without_peer_id().query()).await, 102).await;
        assert_failure_code(client.announce(&QueryBuilder::default().without_port().query()).await, 103).await;
        assert_failure_code(
            client.announce(&QueryBuilder::default().with_peer_id("-qB0").query()).await,
            151,
        )
        .await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_answer_the_code_200_when_the_torrent_is_not_allowed() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let mut cfg = configuration::ephemeral_with_legacy_failure_codes();
        cfg.core.allowed_info_hashes = vec![InfoHash::from_str("0000000000000000000000000000000000000001").unwrap()];

        let env = Started::new(&cfg).await;

        let response = Client::new(*env.bind_address())
            .announce(&QueryBuilder::default().query())
            .await;

        assert_failure_code(response, 200).await;

        env.stop().await;
    }
}

mod configured_with_a_path_key {
    use swarm_tracker_test_helpers::{configuration, random};
    use tracing::level_filters::LevelFilter;

    use crate::common::fixtures::sample_info_hash;
    use crate::common::logging::{tracing_stderr_init, INIT};
    use crate::servers::http::asserts::{assert_empty_announce_response, assert_not_found};
    use crate::servers::http::client::Client;
    use crate::servers::http::requests::QueryBuilder;
    use crate::servers::http::Started;

    #[tokio::test]
    async fn should_serve_the_tracker_under_the_path_key() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let path_key = random::string(32);

        let env = Started::new(&configuration::ephemeral_with_path_key(&path_key)).await;

        let client = Client::with_path_key(*env.bind_address(), &path_key);

        assert_empty_announce_response(client.announce(&QueryBuilder::default().query()).await).await;

        let response = client.swarm(&sample_info_hash()).await;

        assert_eq!(response.status(), 200);

        env.stop().await;
    }

    #[tokio::test]
    async fn should_answer_not_found_without_the_path_key() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral_with_path_key(&random::string(32))).await;

        let client = Client::new(*env.bind_address());

        assert_not_found(client.announce(&QueryBuilder::default().query()).await).await;
        assert_not_found(client.swarm(&sample_info_hash()).await).await;

        let wrong_key_client = Client::with_path_key(*env.bind_address(), "wrong-key");

        assert_not_found(wrong_key_client.announce(&QueryBuilder::default().query()).await).await;

        env.stop().await;
    }
}

mod running_on_reverse_proxy {
    use swarm_tracker_test_helpers::configuration;
    use tracing::level_filters::LevelFilter;

    use crate::common::fixtures::sample_info_hash;
    use crate::common::logging::{tracing_stderr_init, INIT};
    use crate::servers::http::asserts::{assert_empty_announce_response, assert_missing_remote_address_failure};
    use crate::servers::http::client::Client;
    use crate::servers::http::requests::QueryBuilder;
    use crate::servers::http::Started;

    #[tokio::test]
    async fn should_fail_when_the_http_request_does_not_include_the_xff_http_request_header() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        // If the tracker is running behind a reverse proxy, the peer IP is the
        // right most IP in the `X-Forwarded-For` HTTP header, which is the IP of the proxy's client.

        let env = Started::new(&configuration::ephemeral_with_reverse_proxy()).await;

        let response = Client::new(*env.bind_address())
            .announce(&QueryBuilder::default().query())
            .await;

        assert_missing_remote_address_failure(response).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_fail_when_the_xff_http_request_header_contains_an_invalid_ip() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral_with_reverse_proxy()).await;

        let response = Client::new(*env.bind_address())
            .announce_with_header(&QueryBuilder::default().query(), "X-Forwarded-For", "INVALID IP")
            .await;

        assert_missing_remote_address_failure(response).await;

        env.stop().await;
    }

    #[tokio::test]
    async fn should_store_the_right_most_xff_ip_as_the_peer_address() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let env = Started::new(&configuration::ephemeral_with_reverse_proxy()).await;

        let response = Client::new(*env.bind_address())
            .announce_with_header(
                &QueryBuilder::default().query(),
                "X-Forwarded-For",
                "203.0.113.195,150.172.238.178",
            )
            .await;

        assert_empty_announce_response(response).await;

        let peers = env.tracker.get_swarm_peers(&sample_info_hash()).await;

        assert_eq!(peers[0].ip, "150.172.238.178");

        env.stop().await;
    }
}

mod configured_with_telemetry {
    use std::time::Duration;

    use swarm_tracker_test_helpers::configuration;
    use tracing::level_filters::LevelFilter;

    use crate::common::intake::Intake;
    use crate::common::logging::{tracing_stderr_init, INIT};
    use crate::servers::http::asserts::{assert_empty_announce_response, assert_failure_reason};
    use crate::servers::http::client::Client;
    use crate::servers::http::requests::QueryBuilder;
    use crate::servers::http::Started;

    #[tokio::test]
    async fn should_ship_an_event_for_every_announce() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let mut intake = Intake::start().await;

        let mut cfg = configuration::ephemeral();
        cfg.telemetry.api_key = Some("test-api-key".to_string());
        cfg.telemetry.url = intake.url().parse().unwrap();

        let env = Started::new(&cfg).await;

        let response = Client::new(*env.bind_address())
            .announce(&QueryBuilder::default().query())
            .await;

        assert_empty_announce_response(response).await;

        let received = tokio::time::timeout(Duration::from_secs(5), intake.received.recv())
            .await
            .expect("the intake should receive the event")
            .unwrap();

        assert_eq!(received.api_key.as_deref(), Some("test-api-key"));

        let entry = &received.body[0];

        assert_eq!(entry["message"]["type"], "announce");
        assert_eq!(entry["message"]["values"]["peerId"], "-qB00000000000000001");
        assert_eq!(entry["message"]["values"]["infoHash"], "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0");
        assert_eq!(entry["message"]["values"]["event"], "started");
        assert_eq!(entry["message"]["values"]["port"], 17548);
        assert_eq!(entry["ddtags"], "env:prod");
        assert_eq!(entry["service"], "tracker");

        env.stop().await;
    }

    #[tokio::test]
    async fn should_not_ship_an_event_for_a_rejected_announce() {
        INIT.call_once(|| {
            tracing_stderr_init(LevelFilter::ERROR);
        });

        let mut intake = Intake::start().await;

        let mut cfg = configuration::ephemeral();
        cfg.telemetry.api_key = Some("test-api-key".to_string());
        cfg.telemetry.url = intake.url().parse().unwrap();

        let env = Started::new(&cfg).await;

        let response = Client::new(*env.bind_address())
            .announce(&QueryBuilder::default().without_peer_id().query())
            .await;

        assert_failure_reason(response, "missing peer_id").await;

        assert!(tokio::time::timeout(Duration::from_millis(500), intake.received.recv())
            .await
            .is_err());

        env.stop().await;
    }
}

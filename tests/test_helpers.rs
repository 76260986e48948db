//! Shared JSON fixtures for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

/// Serialize a fixture to wire bytes
pub fn bytes(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap()
}

fn header(version: &str) -> Value {
    json!({
        "headerId": 42,
        "timestamp": "2024-05-01T10:00:00.000Z",
        "version": version,
        "manufacturer": "acme",
        "serialNumber": "agv-0001"
    })
}

fn with_header(version: &str, body: Value) -> Value {
    let mut document = header(version);
    let target = document.as_object_mut().unwrap();
    for (key, value) in body.as_object().unwrap() {
        target.insert(key.clone(), value.clone());
    }
    document
}

/// Two nodes joined by one edge, everything released
pub fn example_order(version: &str) -> Value {
    with_header(
        version,
        json!({
            "orderId": "o1",
            "orderUpdateId": 0,
            "nodes": [
                {"nodeId": "n1", "sequenceId": 0, "released": true, "actions": []},
                {"nodeId": "n2", "sequenceId": 2, "released": true, "actions": []}
            ],
            "edges": [
                {"edgeId": "e1", "sequenceId": 1, "released": true,
                 "startNodeId": "n1", "endNodeId": "n2", "actions": []}
            ]
        }),
    )
}

/// Order with base and horizon, actions carrying opaque parameters and a
/// NURBS trajectory; valid under both versions
pub fn rich_order(version: &str) -> Value {
    with_header(
        version,
        json!({
            "orderId": "o-rich",
            "orderUpdateId": 3,
            "zoneSetId": "zones-a",
            "nodes": [
                {
                    "nodeId": "n1", "sequenceId": 0, "released": true,
                    "nodePosition": {"x": 1.5, "y": -2.25, "theta": 0.0, "mapId": "hall", "allowedDeviationXY": 0.1},
                    "actions": [
                        {
                            "actionId": "pick-1", "actionType": "pick", "blockingType": "HARD",
                            "actionParameters": [
                                {"key": "stationType", "value": "floor"},
                                {"key": "loadHeights", "value": [0.2, 0.4, {"unit": "m"}]},
                                {"key": "options", "value": {"retry": 3, "force": null, "tags": []}}
                            ]
                        }
                    ]
                },
                {"nodeId": "n2", "sequenceId": 2, "released": true, "nodeDescription": "dock", "actions": []},
                {"nodeId": "n3", "sequenceId": 4, "released": false, "actions": [
                    {"actionId": "drop-1", "actionType": "drop", "blockingType": "SOFT", "actionDescription": "drop it"}
                ]}
            ],
            "edges": [
                {
                    "edgeId": "e1", "sequenceId": 1, "released": true,
                    "startNodeId": "n1", "endNodeId": "n2", "maxSpeed": 1.2,
                    "trajectory": {
                        "degree": 1,
                        "knotVector": [0.0, 0.0, 1.0, 1.0],
                        "controlPoints": [{"x": 1.5, "y": -2.25}, {"x": 4.0, "y": -2.25, "weight": 2.0}]
                    },
                    "actions": []
                },
                {
                    "edgeId": "e2", "sequenceId": 3, "released": false,
                    "startNodeId": "n2", "endNodeId": "n3",
                    "actions": [{"actionId": "beep-1", "actionType": "beep", "blockingType": "NONE"}]
                }
            ]
        }),
    )
}

/// Idle vehicle report; `actionStates` present so it is valid under both versions
pub fn idle_state(version: &str) -> Value {
    with_header(
        version,
        json!({
            "orderId": "",
            "orderUpdateId": 0,
            "lastNodeId": "",
            "lastNodeSequenceId": 0,
            "driving": false,
            "operatingMode": "AUTOMATIC",
            "nodeStates": [],
            "edgeStates": [],
            "actionStates": [],
            "batteryState": {"batteryCharge": 87.5, "charging": false},
            "errors": [],
            "safetyState": {"eStop": "NONE", "fieldViolation": false}
        }),
    )
}

/// Vehicle driving the edge e1 of `rich_order`
pub fn driving_state(version: &str) -> Value {
    with_header(
        version,
        json!({
            "orderId": "o-rich",
            "orderUpdateId": 3,
            "lastNodeId": "n1",
            "lastNodeSequenceId": 0,
            "driving": true,
            "paused": false,
            "distanceSinceLastNode": 0.75,
            "operatingMode": "AUTOMATIC",
            "nodeStates": [
                {"nodeId": "n2", "sequenceId": 2, "released": true},
                {"nodeId": "n3", "sequenceId": 4, "released": false}
            ],
            "edgeStates": [
                {"edgeId": "e1", "sequenceId": 1, "released": true},
                {"edgeId": "e2", "sequenceId": 3, "released": false}
            ],
            "agvPosition": {"x": 2.25, "y": -2.25, "theta": 0.0, "mapId": "hall", "positionInitialized": true, "localizationScore": 0.98},
            "velocity": {"vx": 1.0, "vy": 0.0, "omega": 0.0},
            "loads": [
                {"loadId": "pallet-7", "loadType": "EPAL", "weight": 120.0,
                 "boundingBoxReference": {"x": 0.0, "y": 0.0, "z": 0.1},
                 "loadDimensions": {"length": 1.2, "width": 0.8}}
            ],
            "actionStates": [
                {"actionId": "pick-1", "actionType": "pick", "actionStatus": "FINISHED"},
                {"actionId": "beep-1", "actionStatus": "WAITING"},
                {"actionId": "drop-1", "actionStatus": "WAITING"}
            ],
            "batteryState": {"batteryCharge": 64.0, "batteryVoltage": 48.2, "batteryHealth": 97.5, "charging": false, "reach": 4200.0},
            "errors": [
                {"errorType": "pathBlocked", "errorLevel": "WARNING",
                 "errorReferences": [{"referenceKey": "edgeId", "referenceValue": "e1"}]}
            ],
            "information": [
                {"infoType": "speedLimit", "infoLevel": "INFO", "infoDescription": "reduced zone"}
            ],
            "safetyState": {"eStop": "NONE", "fieldViolation": false}
        }),
    )
}

pub fn factsheet_v2_0() -> Value {
    with_header(
        "2.0.0",
        json!({
            "typeSpecification": {
                "seriesName": "Carrier-S",
                "agvKinematic": "DIFF",
                "agvClass": "CARRIER",
                "maxLoadMass": 800.0,
                "localizationTypes": ["NATURAL", "REFLECTOR"],
                "navigationTypes": ["AUTONOMOUS"]
            },
            "physicalParameters": {
                "speedMin": 0.01, "speedMax": 2.0,
                "accelerationMax": 0.8, "decelerationMax": 1.2,
                "heightMin": 0.3, "heightMax": 0.4,
                "width": 0.9, "length": 1.4
            },
            "protocolLimits": {
                "maxStringLens": {"idLen": 8},
                "maxArrayLens": {"order.nodes": 4, "order.edges": 3, "state.loads": 1},
                "timing": {"minOrderInterval": 1.0, "minStateInterval": 0.5}
            },
            "protocolFeatures": {
                "optionalParameters": [{"parameter": "order.nodes.nodePosition.theta", "support": "SUPPORTED"}],
                "agvActions": [
                    {
                        "actionType": "pick",
                        "actionScopes": ["NODE"],
                        "blockingTypes": ["HARD"],
                        "actionParameters": [{"key": "stationType", "valueDataType": "STRING", "isOptional": true}]
                    }
                ]
            },
            "agvGeometry": {
                "wheelDefinitions": [
                    {"type": "DRIVE", "isActiveDriven": true, "isActiveSteered": false,
                     "position": {"x": 0.0, "y": 0.4, "theta": 0.0, "mapId": "vehicle"},
                     "diameter": 0.2, "width": 0.05}
                ],
                "envelopes2d": [
                    {"set": "normal", "polygonPoints": [
                        {"x": 0.7, "y": 0.45, "mapId": "vehicle"},
                        {"x": -0.7, "y": 0.45, "mapId": "vehicle"},
                        {"x": -0.7, "y": -0.45, "mapId": "vehicle"}
                    ]}
                ]
            },
            "loadSpecification": {
                "loadPositions": ["front"],
                "loadSets": [
                    {"setName": "EPAL", "loadType": "EPAL", "loadPositions": ["front"],
                     "boundingBoxReference": {"x": 0.0, "y": 0.0, "z": 0.3},
                     "loadDimensions": {"length": 1.2, "width": 0.8, "height": 1.0}}
                ]
            }
        }),
    )
}

pub fn factsheet_v2_1() -> Value {
    json!({
        "version": "2.1.0",
        "manufacturer": "acme",
        "serialNumber": "agv-0001",
        "typeSpecification": {
            "seriesName": "Carrier-S",
            "agvKinematic": "OMNI",
            "agvClass": "CARRIER",
            "maxLoadMass": 800.0,
            "localizationTypes": ["NATURAL"],
            "navigationTypes": ["AUTONOMOUS", "VIRTUAL_LINE_GUIDED"]
        },
        "physicalParameters": {
            "speedMin": 0.01, "speedMax": 2.0,
            "accelerationMax": 0.8, "decelerationMax": 1.2,
            "heightMax": 0.4, "width": 0.9, "length": 1.4
        },
        "protocolLimits": {
            "maxStringLens": {"idLen": 16, "idNumericalOnly": false},
            "maxArrayLens": {"order.nodes": 3, "node.actions": 1, "actions.actionsParameters": 2, "state.errors": 5},
            "timing": {"minOrderInterval": 1.0, "minStateInterval": 0.5, "defaultStateInterval": 30.0}
        },
        "protocolFeatures": {
            "optionalParameters": [],
            "agvActions": [
                {"actionType": "pick", "actionScopes": ["NODE", "INSTANT"], "blockingTypes": ["HARD", "SOFT"]}
            ]
        },
        "agvGeometry": {
            "envelopes3d": [{"set": "normal", "format": "DXF", "data": {"layers": ["base", {"z": [0, 1.5]}]}}]
        },
        "loadSpecification": {},
        "vehicleConfig": {
            "versions": [{"key": "firmware", "value": "4.2.1"}],
            "network": {"dnsServers": ["10.0.0.1"], "netmask": "255.255.255.0"}
        }
    })
}

pub fn instant_actions(version: &str) -> Value {
    with_header(
        version,
        json!({
            "actions": [
                {"actionId": "ia-1", "actionType": "cancelOrder", "blockingType": "HARD"},
                {"actionId": "ia-2", "actionType": "initPosition", "blockingType": "HARD",
                 "actionParameters": [
                     {"key": "x", "value": 1.0},
                     {"key": "lastNodeId", "value": "n1"}
                 ]}
            ]
        }),
    )
}
